//! Persistent scalar state and derived combat numbers.

use serde::{Deserialize, Serialize};

use crate::attributes::{CharacterAttributes, CharacterSkills};
use crate::perks::{Perk, PerkEffect};
use crate::track::Track;

/// Experience needed for the first level-up.
pub const BASE_EXPERIENCE: f64 = 1000.0;
/// Growth ratio of the experience curve per level.
pub const EXPERIENCE_RATIO: f64 = 1.15;
/// Highest street cred rating.
pub const MAX_CRED: i32 = 100;
/// Starting humanity.
pub const MAX_HUMANITY: u32 = 100;

/// Experience needed to advance past `level`: `floor(1000 × 1.15^(level-1))`.
pub fn experience_for_level(level: u32) -> u64 {
    let exponent = i32::try_from(level.saturating_sub(1)).unwrap_or(i32::MAX);
    (BASE_EXPERIENCE * EXPERIENCE_RATIO.powi(exponent)).floor() as u64
}

/// Numbers recomputed from attributes, skills, and learned perks.
///
/// Never assigned directly; see [`CombatStats::derive`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatStats {
    /// Base weapon damage.
    pub damage: i32,
    /// Damage reduction.
    pub defense: i32,
    /// Quickhack strength.
    pub hacking_power: i32,
    /// Chance to stay unseen.
    pub stealth_rating: i32,
    /// Weight the character can carry.
    pub carry_capacity: i32,
}

impl CombatStats {
    /// Compute derived numbers.
    pub fn derive(
        attributes: &CharacterAttributes,
        skills: &CharacterSkills,
        perks: &[Perk],
    ) -> Self {
        let body = i32::from(attributes.body);
        let mut stats = Self {
            damage: 10 + body + i32::from(skills.assault) + i32::from(skills.handguns),
            defense: 5 + body + i32::from(skills.athletics),
            hacking_power: i32::from(attributes.intelligence)
                + i32::from(skills.breach)
                + i32::from(skills.quickhacking),
            stealth_rating: i32::from(attributes.cool) + i32::from(skills.stealth),
            carry_capacity: 50 + body * 10,
        };
        for perk in perks.iter().filter(|p| p.learned) {
            match perk.effect {
                PerkEffect::DamageBonus(n) => stats.damage += n,
                PerkEffect::DefenseBonus(n) => stats.defense += n,
                PerkEffect::HackingBonus(n) => stats.hacking_power += n,
                PerkEffect::StealthBonus(n) => stats.stealth_rating += n,
                PerkEffect::CarryBonus(n) => stats.carry_capacity += n,
                PerkEffect::ExperienceBonus(_) | PerkEffect::StaminaBonus(_) => {}
            }
        }
        stats
    }
}

/// Maximum health for a body score: `100 + (body - 3) × 20`.
pub fn max_health_for(attributes: &CharacterAttributes) -> i32 {
    100 + (i32::from(attributes.body) - 3) * 20
}

/// Maximum stamina for a body score plus learned stamina perks:
/// `100 + (body - 3) × 15`.
pub fn max_stamina_for(attributes: &CharacterAttributes, perks: &[Perk]) -> i32 {
    let bonus: i32 = perks
        .iter()
        .filter(|p| p.learned)
        .filter_map(|p| match p.effect {
            PerkEffect::StaminaBonus(n) => Some(n),
            _ => None,
        })
        .sum();
    100 + (i32::from(attributes.body) - 3) * 15 + bonus
}

/// Total experience bonus percentage from learned perks.
pub fn experience_bonus_percent(perks: &[Perk]) -> u32 {
    perks
        .iter()
        .filter(|p| p.learned)
        .filter_map(|p| match p.effect {
            PerkEffect::ExperienceBonus(pct) => Some(pct),
            _ => None,
        })
        .sum()
}

/// Level, experience, resources, and derived numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterStats {
    /// Current level, starting at 1.
    pub level: u32,
    /// Experience carried toward the next level.
    pub experience: u64,
    /// Experience needed for the next level.
    pub experience_to_next: u64,
    /// Unspent attribute points.
    pub attribute_points: u32,
    /// Unspent skill points.
    pub skill_points: u32,
    /// Health pool.
    pub health: Track,
    /// Stamina pool.
    pub stamina: Track,
    /// Money. Only spending checks the balance.
    pub eddies: i64,
    /// Street cred, 0 to 100.
    pub cred_rating: i32,
    /// Humanity lost to cyberware.
    pub humanity_loss: u32,
    /// Humanity ceiling.
    pub max_humanity: u32,
    /// Derived combat numbers.
    pub combat: CombatStats,
}

impl Default for CharacterStats {
    fn default() -> Self {
        Self {
            level: 1,
            experience: 0,
            experience_to_next: experience_for_level(1),
            attribute_points: 5,
            skill_points: 5,
            health: Track::full(100),
            stamina: Track::full(100),
            eddies: 500,
            cred_rating: 0,
            humanity_loss: 0,
            max_humanity: MAX_HUMANITY,
            combat: CombatStats::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perks::perk_catalog;

    #[test]
    fn experience_curve() {
        assert_eq!(experience_for_level(1), 1000);
        assert_eq!(experience_for_level(2), 1150);
        assert_eq!(experience_for_level(3), 1322);
    }

    #[test]
    fn experience_curve_grows() {
        for level in 1..40 {
            assert!(experience_for_level(level + 1) > experience_for_level(level));
        }
    }

    #[test]
    fn derived_defaults() {
        let attrs = CharacterAttributes::default();
        let skills = CharacterSkills::default();
        let stats = CombatStats::derive(&attrs, &skills, &perk_catalog());
        assert_eq!(stats.damage, 15);
        assert_eq!(stats.defense, 9);
        assert_eq!(stats.hacking_power, 5);
        assert_eq!(stats.stealth_rating, 4);
        assert_eq!(stats.carry_capacity, 80);
        assert_eq!(max_health_for(&attrs), 100);
        assert_eq!(max_stamina_for(&attrs, &perk_catalog()), 100);
    }

    #[test]
    fn learned_perks_add_flat_bonuses() {
        let attrs = CharacterAttributes::default();
        let skills = CharacterSkills::default();
        let mut perks = perk_catalog();
        for perk in perks.iter_mut().filter(|p| p.id == "ghost" || p.id == "marathoner") {
            perk.unlocked = true;
            perk.learned = true;
        }
        let stats = CombatStats::derive(&attrs, &skills, &perks);
        assert_eq!(stats.stealth_rating, 7);
        assert_eq!(max_stamina_for(&attrs, &perks), 120);
        assert_eq!(experience_bonus_percent(&perks), 0);
    }

    #[test]
    fn body_scales_pools() {
        let attrs = CharacterAttributes {
            body: 5,
            ..Default::default()
        };
        assert_eq!(max_health_for(&attrs), 140);
        assert_eq!(max_stamina_for(&attrs, &[]), 130);
    }
}
