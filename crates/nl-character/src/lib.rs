//! Character progression for Nightline.
//!
//! [`CharacterProgression`] owns attributes, skills, stats, perks, and the
//! character's identity. Attributes and skills rise only by spending points
//! or through origin and role bonuses; combat numbers are always derived.
//! Rejected operations come back as failed [`nl_core::ActionResult`]s.

/// Attribute and skill scores.
pub mod attributes;
/// Error types.
pub mod error;
/// Origins, roles, and background.
pub mod identity;
/// The perk catalog.
pub mod perks;
/// The progression store.
pub mod progression;
/// Stats and derived numbers.
pub mod stats;
/// Clamped resource pools.
pub mod track;

pub use attributes::{Attribute, CharacterAttributes, CharacterSkills, Skill};
pub use error::{CharacterError, CharacterResult};
pub use identity::{Appearance, CharacterBackground, Origin, Role};
pub use perks::{Perk, PerkEffect, PerkRequirement, PerkState, perk_catalog};
pub use progression::{
    CharacterProgression, CharacterSnapshot, DamageOutcome, LevelUpEvent, ProgressionEvent,
    ProgressionKind,
};
pub use stats::{CharacterStats, CombatStats, experience_for_level};
pub use track::Track;
