//! Narrative memory for Nightline.
//!
//! [`NarrativeMemory`] keeps five bounded lists (key events, character
//! developments, important choices, location history, plot points) plus NPC
//! relationships, and renders them into prompt context and a story recap.

/// The narrative log.
pub mod memory;

pub use memory::{Bound, NarrativeMemory, NpcRelationship};
