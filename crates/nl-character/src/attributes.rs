//! Attributes and skills.
//!
//! Both are closed sets of named scores clamped to
//! [`MIN_SCORE`]..=[`MAX_SCORE`]. They are only raised by spending points or
//! by origin and role bonuses.

use serde::{Deserialize, Serialize};

/// Lowest value any attribute or skill can hold.
pub const MIN_SCORE: u8 = 1;
/// Highest value any attribute or skill can hold.
pub const MAX_SCORE: u8 = 20;

/// Starting value of every attribute.
pub const STARTING_ATTRIBUTE: u8 = 3;
/// Starting value of every skill.
pub const STARTING_SKILL: u8 = 1;

/// The five core attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    /// Physical toughness; drives health, stamina, melee, and carrying.
    Body,
    /// Reasoning and netrunning aptitude.
    Intelligence,
    /// Speed and gun handling.
    Reflexes,
    /// Crafting and engineering aptitude.
    Technical,
    /// Composure and stealth.
    Cool,
}

impl Attribute {
    /// Every attribute, in display order.
    pub const ALL: [Self; 5] = [
        Self::Body,
        Self::Intelligence,
        Self::Reflexes,
        Self::Technical,
        Self::Cool,
    ];

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Body => "Body",
            Self::Intelligence => "Intelligence",
            Self::Reflexes => "Reflexes",
            Self::Technical => "Technical",
            Self::Cool => "Cool",
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The twelve trainable skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    /// Running, climbing, and endurance.
    Athletics,
    /// Heavy weapons.
    Annihilation,
    /// Unarmed and blunt melee.
    StreetBrawler,
    /// Rifles and SMGs.
    Assault,
    /// Pistols and revolvers.
    Handguns,
    /// Edged melee weapons.
    Blades,
    /// Building and upgrading gear.
    Crafting,
    /// Tech weapons and machinery.
    Engineering,
    /// Breach protocol against ICE.
    Breach,
    /// Combat and covert quickhacks.
    Quickhacking,
    /// Moving unseen.
    Stealth,
    /// Keeping calm under fire.
    ColdBlood,
}

impl Skill {
    /// Every skill, in display order.
    pub const ALL: [Self; 12] = [
        Self::Athletics,
        Self::Annihilation,
        Self::StreetBrawler,
        Self::Assault,
        Self::Handguns,
        Self::Blades,
        Self::Crafting,
        Self::Engineering,
        Self::Breach,
        Self::Quickhacking,
        Self::Stealth,
        Self::ColdBlood,
    ];

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Athletics => "Athletics",
            Self::Annihilation => "Annihilation",
            Self::StreetBrawler => "Street Brawler",
            Self::Assault => "Assault",
            Self::Handguns => "Handguns",
            Self::Blades => "Blades",
            Self::Crafting => "Crafting",
            Self::Engineering => "Engineering",
            Self::Breach => "Breach Protocol",
            Self::Quickhacking => "Quickhacking",
            Self::Stealth => "Stealth",
            Self::ColdBlood => "Cold Blood",
        }
    }
}

impl std::fmt::Display for Skill {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Attribute scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterAttributes {
    /// Body score.
    pub body: u8,
    /// Intelligence score.
    pub intelligence: u8,
    /// Reflexes score.
    pub reflexes: u8,
    /// Technical score.
    pub technical: u8,
    /// Cool score.
    pub cool: u8,
}

impl Default for CharacterAttributes {
    fn default() -> Self {
        Self {
            body: STARTING_ATTRIBUTE,
            intelligence: STARTING_ATTRIBUTE,
            reflexes: STARTING_ATTRIBUTE,
            technical: STARTING_ATTRIBUTE,
            cool: STARTING_ATTRIBUTE,
        }
    }
}

impl CharacterAttributes {
    /// Current score of an attribute.
    pub fn get(&self, attribute: Attribute) -> u8 {
        match attribute {
            Attribute::Body => self.body,
            Attribute::Intelligence => self.intelligence,
            Attribute::Reflexes => self.reflexes,
            Attribute::Technical => self.technical,
            Attribute::Cool => self.cool,
        }
    }

    fn slot_mut(&mut self, attribute: Attribute) -> &mut u8 {
        match attribute {
            Attribute::Body => &mut self.body,
            Attribute::Intelligence => &mut self.intelligence,
            Attribute::Reflexes => &mut self.reflexes,
            Attribute::Technical => &mut self.technical,
            Attribute::Cool => &mut self.cool,
        }
    }

    /// Add a (possibly negative) delta, clamping to the score range.
    /// Returns the new value.
    pub fn adjust(&mut self, attribute: Attribute, delta: i32) -> u8 {
        let slot = self.slot_mut(attribute);
        *slot = clamp_score(i32::from(*slot) + delta);
        *slot
    }

    /// Returns true if every score is within range.
    pub fn in_range(&self) -> bool {
        Attribute::ALL
            .iter()
            .all(|a| (MIN_SCORE..=MAX_SCORE).contains(&self.get(*a)))
    }
}

/// Skill scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSkills {
    /// Athletics score.
    pub athletics: u8,
    /// Annihilation score.
    pub annihilation: u8,
    /// Street Brawler score.
    pub street_brawler: u8,
    /// Assault score.
    pub assault: u8,
    /// Handguns score.
    pub handguns: u8,
    /// Blades score.
    pub blades: u8,
    /// Crafting score.
    pub crafting: u8,
    /// Engineering score.
    pub engineering: u8,
    /// Breach Protocol score.
    pub breach: u8,
    /// Quickhacking score.
    pub quickhacking: u8,
    /// Stealth score.
    pub stealth: u8,
    /// Cold Blood score.
    pub cold_blood: u8,
}

impl Default for CharacterSkills {
    fn default() -> Self {
        Self {
            athletics: STARTING_SKILL,
            annihilation: STARTING_SKILL,
            street_brawler: STARTING_SKILL,
            assault: STARTING_SKILL,
            handguns: STARTING_SKILL,
            blades: STARTING_SKILL,
            crafting: STARTING_SKILL,
            engineering: STARTING_SKILL,
            breach: STARTING_SKILL,
            quickhacking: STARTING_SKILL,
            stealth: STARTING_SKILL,
            cold_blood: STARTING_SKILL,
        }
    }
}

impl CharacterSkills {
    /// Current score of a skill.
    pub fn get(&self, skill: Skill) -> u8 {
        match skill {
            Skill::Athletics => self.athletics,
            Skill::Annihilation => self.annihilation,
            Skill::StreetBrawler => self.street_brawler,
            Skill::Assault => self.assault,
            Skill::Handguns => self.handguns,
            Skill::Blades => self.blades,
            Skill::Crafting => self.crafting,
            Skill::Engineering => self.engineering,
            Skill::Breach => self.breach,
            Skill::Quickhacking => self.quickhacking,
            Skill::Stealth => self.stealth,
            Skill::ColdBlood => self.cold_blood,
        }
    }

    fn slot_mut(&mut self, skill: Skill) -> &mut u8 {
        match skill {
            Skill::Athletics => &mut self.athletics,
            Skill::Annihilation => &mut self.annihilation,
            Skill::StreetBrawler => &mut self.street_brawler,
            Skill::Assault => &mut self.assault,
            Skill::Handguns => &mut self.handguns,
            Skill::Blades => &mut self.blades,
            Skill::Crafting => &mut self.crafting,
            Skill::Engineering => &mut self.engineering,
            Skill::Breach => &mut self.breach,
            Skill::Quickhacking => &mut self.quickhacking,
            Skill::Stealth => &mut self.stealth,
            Skill::ColdBlood => &mut self.cold_blood,
        }
    }

    /// Add a (possibly negative) delta, clamping to the score range.
    /// Returns the new value.
    pub fn adjust(&mut self, skill: Skill, delta: i32) -> u8 {
        let slot = self.slot_mut(skill);
        *slot = clamp_score(i32::from(*slot) + delta);
        *slot
    }

    /// Returns true if every score is within range.
    pub fn in_range(&self) -> bool {
        Skill::ALL
            .iter()
            .all(|s| (MIN_SCORE..=MAX_SCORE).contains(&self.get(*s)))
    }
}

fn clamp_score(value: i32) -> u8 {
    // The clamp bounds fit in u8, so the conversion cannot fail.
    u8::try_from(value.clamp(i32::from(MIN_SCORE), i32::from(MAX_SCORE))).unwrap_or(MAX_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let attrs = CharacterAttributes::default();
        assert!(Attribute::ALL.iter().all(|a| attrs.get(*a) == 3));
        let skills = CharacterSkills::default();
        assert!(Skill::ALL.iter().all(|s| skills.get(*s) == 1));
    }

    #[test]
    fn adjust_clamps() {
        let mut attrs = CharacterAttributes::default();
        assert_eq!(attrs.adjust(Attribute::Cool, 40), 20);
        assert_eq!(attrs.adjust(Attribute::Cool, -40), 1);
        assert!(attrs.in_range());
    }

    #[test]
    fn skills_adjust_only_target() {
        let mut skills = CharacterSkills::default();
        skills.adjust(Skill::Breach, 2);
        assert_eq!(skills.get(Skill::Breach), 3);
        assert_eq!(skills.get(Skill::Quickhacking), 1);
    }

    #[test]
    fn out_of_range_detected() {
        let skills = CharacterSkills {
            stealth: 25,
            ..Default::default()
        };
        assert!(!skills.in_range());
    }

    #[test]
    fn display_names() {
        assert_eq!(Skill::ColdBlood.to_string(), "Cold Blood");
        assert_eq!(Attribute::Technical.to_string(), "Technical");
    }
}
