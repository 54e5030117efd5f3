//! Error types for character progression.

use crate::attributes::{Attribute, Skill};

/// Reasons a character operation is rejected.
///
/// Public store methods turn these into failed [`nl_core::ActionResult`]s;
/// the display text is the message the player sees.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CharacterError {
    /// The attribute point pool is empty.
    #[error("no attribute points available")]
    NoAttributePoints,

    /// The skill point pool is empty.
    #[error("no skill points available")]
    NoSkillPoints,

    /// The attribute is already at the cap.
    #[error("{0} is already at maximum")]
    AttributeAtCap(Attribute),

    /// The skill is already at the cap.
    #[error("{0} is already at maximum")]
    SkillAtCap(Skill),

    /// No perk with this id exists.
    #[error("unknown perk: {0}")]
    UnknownPerk(String),

    /// The perk's requirement has not been met.
    #[error("{name} is locked (requires {requirement})")]
    PerkLocked {
        /// Perk display name.
        name: String,
        /// Requirement text.
        requirement: String,
    },

    /// The perk was already learned.
    #[error("{0} is already learned")]
    PerkAlreadyLearned(String),

    /// The perk costs more skill points than are available.
    #[error("not enough skill points (need {needed}, have {available})")]
    NotEnoughSkillPoints {
        /// Cost of the perk.
        needed: u32,
        /// Points in the pool.
        available: u32,
    },

    /// Spending would take eddies below zero.
    #[error("not enough eddies (need {needed}, have {available})")]
    InsufficientEddies {
        /// Amount requested.
        needed: i64,
        /// Current balance.
        available: i64,
    },

    /// No role has been selected yet.
    #[error("choose a role before a specialization")]
    NoRoleSelected,

    /// The specialization is not offered by the current role.
    #[error("{0} is not a specialization of this role")]
    InvalidSpecialization(String),

    /// A specialization was already chosen for the current role.
    #[error("specialization already set to {0}")]
    SpecializationAlreadySet(String),

    /// A snapshot failed validation on restore.
    #[error("invalid character snapshot: {0}")]
    InvalidSnapshot(String),
}

/// Convenience result type for character operations.
pub type CharacterResult<T> = Result<T, CharacterError>;
