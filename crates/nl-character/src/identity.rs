//! Origins, roles, and the character background.

use serde::{Deserialize, Serialize};

use crate::attributes::{Attribute, Skill};

/// Where the character comes from. Chosen once during creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Raised inside a megacorporation.
    Corpo,
    /// Raised on the streets of Night City.
    StreetKid,
    /// Raised in a clan out in the Badlands.
    Nomad,
}

impl Origin {
    /// Every origin.
    pub const ALL: [Self; 3] = [Self::Corpo, Self::StreetKid, Self::Nomad];

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Corpo => "Corpo",
            Self::StreetKid => "Street Kid",
            Self::Nomad => "Nomad",
        }
    }

    /// One-time additive attribute bonuses granted by this origin.
    pub fn attribute_bonuses(&self) -> &'static [(Attribute, i32)] {
        match self {
            Self::Corpo => &[(Attribute::Intelligence, 1), (Attribute::Cool, 1)],
            Self::StreetKid => &[(Attribute::Reflexes, 1), (Attribute::Cool, 1)],
            Self::Nomad => &[(Attribute::Body, 1), (Attribute::Technical, 1)],
        }
    }

    /// Narrative hooks the story model can pull on for this origin.
    pub fn background_hooks(&self) -> &'static [&'static str] {
        match self {
            Self::Corpo => &[
                "Burned out of Arasaka counter-intelligence by a rival",
                "Still owes a favor to an old department head",
                "Knows the back corridors of Corpo Plaza",
            ],
            Self::StreetKid => &[
                "Grew up running errands for the Tyger Claws",
                "Has an old friend tending bar at Lizzie's",
                "Knows every shortcut through Watson",
            ],
            Self::Nomad => &[
                "Left the Aldecaldos clan under a cloud",
                "Keeps a modified car stashed in the Badlands",
                "Trusts family over eddies",
            ],
        }
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The character's class archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Hired gun.
    Solo,
    /// Hacker.
    Netrunner,
    /// Mechanic and inventor.
    Techie,
    /// Street doctor.
    Medtech,
    /// Journalist or streamer.
    Media,
    /// Corporate operator.
    Exec,
    /// Cop or security.
    Lawman,
    /// Dealmaker.
    Fixer,
    /// Rebel musician.
    Rockerboy,
}

impl Role {
    /// Every role.
    pub const ALL: [Self; 9] = [
        Self::Solo,
        Self::Netrunner,
        Self::Techie,
        Self::Medtech,
        Self::Media,
        Self::Exec,
        Self::Lawman,
        Self::Fixer,
        Self::Rockerboy,
    ];

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Solo => "Solo",
            Self::Netrunner => "Netrunner",
            Self::Techie => "Techie",
            Self::Medtech => "Medtech",
            Self::Media => "Media",
            Self::Exec => "Exec",
            Self::Lawman => "Lawman",
            Self::Fixer => "Fixer",
            Self::Rockerboy => "Rockerboy",
        }
    }

    /// One-time additive skill bonuses granted by this role.
    pub fn skill_bonuses(&self) -> &'static [(Skill, i32)] {
        match self {
            Self::Solo => &[(Skill::Assault, 2), (Skill::Blades, 1)],
            Self::Netrunner => &[(Skill::Quickhacking, 2), (Skill::Breach, 1)],
            Self::Techie => &[(Skill::Crafting, 2), (Skill::Engineering, 1)],
            Self::Medtech => &[(Skill::Engineering, 2), (Skill::Athletics, 1)],
            Self::Media => &[(Skill::Stealth, 2), (Skill::ColdBlood, 1)],
            Self::Exec => &[(Skill::ColdBlood, 2), (Skill::Handguns, 1)],
            Self::Lawman => &[(Skill::Handguns, 2), (Skill::Assault, 1)],
            Self::Fixer => &[(Skill::StreetBrawler, 2), (Skill::ColdBlood, 1)],
            Self::Rockerboy => &[(Skill::Annihilation, 2), (Skill::StreetBrawler, 1)],
        }
    }

    /// Specializations available to this role.
    pub fn specializations(&self) -> &'static [&'static str] {
        match self {
            Self::Solo => &["Assassin", "Bodyguard", "Mercenary"],
            Self::Netrunner => &["Ghost Runner", "Daemon Smith", "Data Broker"],
            Self::Techie => &["Weaponsmith", "Cyberware Tinker", "Vehicle Mechanic"],
            Self::Medtech => &["Ripperdoc", "Trauma Team Medic", "Pharmacist"],
            Self::Media => &["Investigative Journalist", "Streamer", "Propagandist"],
            Self::Exec => &["Negotiator", "Black Ops Handler", "Division Manager"],
            Self::Lawman => &["NCPD Detective", "Corporate Security", "Bounty Hunter"],
            Self::Fixer => &["Arms Dealer", "Information Broker", "Gig Broker"],
            Self::Rockerboy => &["Street Poet", "Chrome Rocker", "Underground DJ"],
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Free-text appearance fields filled in during creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appearance {
    /// Hair description.
    pub hair: String,
    /// Eye description.
    pub eyes: String,
    /// Visible chrome.
    pub cyberware: String,
    /// Clothing style.
    pub style: String,
}

/// Who the character is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterBackground {
    /// Character name.
    pub name: String,
    /// Chosen origin, if any.
    pub origin: Option<Origin>,
    /// Chosen role, if any.
    pub role: Option<Role>,
    /// Role specialization; cleared whenever the role changes.
    pub specialization: Option<String>,
    /// Player-written backstory.
    pub background_story: String,
    /// Appearance notes.
    pub appearance: Appearance,
    /// Hooks drawn from the origin table.
    pub background_hooks: Vec<String>,
}

impl Default for CharacterBackground {
    fn default() -> Self {
        Self {
            name: "V".to_string(),
            origin: None,
            role: None,
            specialization: None,
            background_story: String::new(),
            appearance: Appearance::default(),
            background_hooks: Vec::new(),
        }
    }
}

impl CharacterBackground {
    /// Short identity line, e.g. `Corpo Netrunner (Ghost Runner)`.
    pub fn identity_line(&self) -> String {
        let mut parts = Vec::new();
        if let Some(origin) = self.origin {
            parts.push(origin.name().to_string());
        }
        if let Some(role) = self.role {
            parts.push(role.name().to_string());
        }
        let mut line = if parts.is_empty() {
            "Unaligned".to_string()
        } else {
            parts.join(" ")
        };
        if let Some(specialization) = &self.specialization {
            line.push_str(&format!(" ({specialization})"));
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_role_has_three_specializations() {
        for role in Role::ALL {
            assert_eq!(role.specializations().len(), 3, "{role}");
            assert!(!role.skill_bonuses().is_empty());
        }
    }

    #[test]
    fn corpo_bonus() {
        assert_eq!(
            Origin::Corpo.attribute_bonuses(),
            &[(Attribute::Intelligence, 1), (Attribute::Cool, 1)]
        );
    }

    #[test]
    fn identity_line() {
        let mut bg = CharacterBackground::default();
        assert_eq!(bg.identity_line(), "Unaligned");
        bg.origin = Some(Origin::StreetKid);
        bg.role = Some(Role::Solo);
        bg.specialization = Some("Mercenary".to_string());
        assert_eq!(bg.identity_line(), "Street Kid Solo (Mercenary)");
    }
}
