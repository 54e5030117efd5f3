//! Story-to-state synchronization for Nightline.
//!
//! [`GameStateManager`] turns narrative text into game-state changes: it runs
//! the extractor, applies the signals to the character, inventory and map
//! stores in a fixed order, records the turn in narrative memory, and tells
//! subscribers. It also writes and reads the versioned save blob.

pub mod config;
pub mod error;
pub mod manager;
pub mod save;

pub use config::SyncConfig;
pub use error::{SyncError, SyncResult};
pub use manager::{AMBUSH_EXPERIENCE, GameSnapshot, GameStateManager, SubscriptionId};
pub use save::{SAVE_VERSION, SaveFile};
