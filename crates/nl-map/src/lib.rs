//! Night City map for Nightline.
//!
//! [`CityMap`] owns a fixed graph of locations, the player's position, and
//! per-location `discovered`/`unlocked` flags that only ever turn on.
//! Travel follows connections until a fast-travel terminal is found. The
//! [`story`] helpers spot location mentions in narrative text.

/// Error types.
pub mod error;
/// The static city graph.
pub mod graph;
/// Location and marker types.
pub mod location;
/// The map store.
pub mod map;
/// Location matching in narrative text.
pub mod story;

pub use error::{MapError, MapResult};
pub use graph::START_LOCATION;
pub use location::{
    AccessContext, AccessRequirement, DangerLevel, District, Location, MapMarker, MarkerKind,
};
pub use map::{CityMap, LocationState, MapSnapshot};
pub use story::is_explicit_arrival;
