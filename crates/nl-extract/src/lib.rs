//! Lexical event extraction for Nightline.
//!
//! Scans free-form narrative text produced by the story model for
//! state-changing signals: experience, damage, eddies, street cred, items
//! found or lost, location changes, combat, NPC encounters, and plot hooks.
//! Everything here is a pure function of the input text; applying the
//! signals to game state is the job of `nl-sync`.

/// Removal of host-only markup such as image prompt blocks.
pub mod clean;
/// The `extract` entry point.
pub mod extract;
/// Compiled pattern tables.
mod patterns;
/// Signal types produced by extraction.
pub mod updates;

pub use clean::{clean_narrative, image_prompt};
pub use extract::{extract, is_valid_item_phrase};
pub use patterns::STREET_LOCATION_ID;
pub use updates::{StoryTrigger, StoryUpdates};
