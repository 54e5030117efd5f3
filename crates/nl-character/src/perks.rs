//! Perk catalog.
//!
//! Perks are static catalog entries. The only mutable parts are the
//! `unlocked` and `learned` flags, and `learned` implies `unlocked`.

use serde::{Deserialize, Serialize};

use crate::attributes::{Attribute, CharacterAttributes, CharacterSkills, Skill};

/// Threshold a character must meet before a perk unlocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PerkRequirement {
    /// Attribute at or above the given score.
    Attribute(Attribute, u8),
    /// Skill at or above the given score.
    Skill(Skill, u8),
}

impl PerkRequirement {
    /// Returns true if the scores satisfy this requirement.
    pub fn is_met(&self, attributes: &CharacterAttributes, skills: &CharacterSkills) -> bool {
        match *self {
            Self::Attribute(attribute, min) => attributes.get(attribute) >= min,
            Self::Skill(skill, min) => skills.get(skill) >= min,
        }
    }
}

impl std::fmt::Display for PerkRequirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Attribute(attribute, min) => write!(f, "{attribute} {min}"),
            Self::Skill(skill, min) => write!(f, "{skill} {min}"),
        }
    }
}

/// Passive bonus granted by a learned perk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PerkEffect {
    /// Percentage bonus to all experience gained.
    ExperienceBonus(u32),
    /// Flat damage bonus.
    DamageBonus(i32),
    /// Flat defense bonus.
    DefenseBonus(i32),
    /// Flat hacking power bonus.
    HackingBonus(i32),
    /// Flat stealth rating bonus.
    StealthBonus(i32),
    /// Flat maximum stamina bonus.
    StaminaBonus(i32),
    /// Flat carry capacity bonus.
    CarryBonus(i32),
}

/// A learnable perk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Perk {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// What the perk does.
    pub description: String,
    /// Skill points needed to learn it.
    pub cost: u32,
    /// Unlock threshold.
    pub requirement: PerkRequirement,
    /// Bonus applied once learned.
    pub effect: PerkEffect,
    /// Requirement has been met at some point.
    pub unlocked: bool,
    /// Skill points have been spent on it.
    pub learned: bool,
}

impl Perk {
    fn new(
        id: &str,
        name: &str,
        description: &str,
        cost: u32,
        requirement: PerkRequirement,
        effect: PerkEffect,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            cost,
            requirement,
            effect,
            unlocked: false,
            learned: false,
        }
    }
}

/// Mutable state of one perk, as persisted in saves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerkState {
    /// Unlock flag.
    pub unlocked: bool,
    /// Learned flag.
    pub learned: bool,
}

/// The full perk catalog with every flag cleared.
pub fn perk_catalog() -> Vec<Perk> {
    vec![
        Perk::new(
            "ghost",
            "Ghost",
            "You move like smoke. +3 stealth rating.",
            2,
            PerkRequirement::Skill(Skill::Stealth, 4),
            PerkEffect::StealthBonus(3),
        ),
        Perk::new(
            "fast_learner",
            "Fast Learner",
            "Every lesson sticks. +10% experience.",
            2,
            PerkRequirement::Attribute(Attribute::Intelligence, 5),
            PerkEffect::ExperienceBonus(10),
        ),
        Perk::new(
            "deadeye",
            "Deadeye",
            "Steady hands, clean shots. +3 damage.",
            2,
            PerkRequirement::Skill(Skill::Handguns, 4),
            PerkEffect::DamageBonus(3),
        ),
        Perk::new(
            "iron_skin",
            "Iron Skin",
            "Subdermal plating shrugs off hits. +3 defense.",
            3,
            PerkRequirement::Attribute(Attribute::Body, 5),
            PerkEffect::DefenseBonus(3),
        ),
        Perk::new(
            "daemon_weaver",
            "Daemon Weaver",
            "Your daemons slip past ICE. +4 hacking power.",
            3,
            PerkRequirement::Skill(Skill::Quickhacking, 4),
            PerkEffect::HackingBonus(4),
        ),
        Perk::new(
            "marathoner",
            "Marathoner",
            "You never run out of breath. +20 max stamina.",
            1,
            PerkRequirement::Skill(Skill::Athletics, 4),
            PerkEffect::StaminaBonus(20),
        ),
        Perk::new(
            "pack_mule",
            "Pack Mule",
            "Reinforced spine actuators. +25 carry capacity.",
            2,
            PerkRequirement::Attribute(Attribute::Body, 6),
            PerkEffect::CarryBonus(25),
        ),
    ]
}
