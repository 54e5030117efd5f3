//! The character progression store.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use nl_core::ActionResult;

use crate::attributes::{Attribute, CharacterAttributes, CharacterSkills, MAX_SCORE, Skill};
use crate::error::{CharacterError, CharacterResult};
use crate::identity::{Appearance, CharacterBackground, Origin, Role};
use crate::perks::{Perk, PerkState, perk_catalog};
use crate::stats::{
    CharacterStats, CombatStats, MAX_CRED, experience_bonus_percent, experience_for_level,
    max_health_for, max_stamina_for,
};

/// Most progression events kept in history.
pub const HISTORY_LIMIT: usize = 100;

/// Attribute points granted per level.
pub const ATTRIBUTE_POINTS_PER_LEVEL: u32 = 1;
/// Skill points granted per level.
pub const SKILL_POINTS_PER_LEVEL: u32 = 2;
/// Eddies awarded per level reached, multiplied by the new level.
pub const EDDIES_PER_LEVEL: i64 = 50;

/// What kind of progression happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressionKind {
    /// Reached a new level.
    LevelUp,
    /// Spent an attribute point.
    AttributeIncreased,
    /// Spent a skill point.
    SkillIncreased,
    /// Learned a perk.
    PerkLearned,
    /// Picked an origin.
    OriginSelected,
    /// Picked a role.
    RoleSelected,
    /// Picked a role specialization.
    SpecializationSelected,
}

/// One entry in the progression history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionEvent {
    /// When it happened.
    pub timestamp: DateTime<Utc>,
    /// What happened.
    pub kind: ProgressionKind,
    /// Human-readable detail.
    pub detail: String,
}

/// A single level gained by [`CharacterProgression::add_experience`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUpEvent {
    /// The level just reached.
    pub level: u32,
    /// Attribute points granted.
    pub attribute_points: u32,
    /// Skill points granted.
    pub skill_points: u32,
    /// Eddies awarded.
    pub eddies: i64,
}

/// Result of [`CharacterProgression::take_damage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageOutcome {
    /// Health after the hit.
    pub health: i32,
    /// Health reached zero.
    pub died: bool,
}

/// Serialized form of the whole store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSnapshot {
    /// Attribute scores.
    pub attributes: CharacterAttributes,
    /// Skill scores.
    pub skills: CharacterSkills,
    /// Stats, including derived numbers.
    pub stats: CharacterStats,
    /// Identity data.
    pub background: CharacterBackground,
    /// Perk flags by perk id.
    pub perks: BTreeMap<String, PerkState>,
    /// Progression history, oldest first.
    pub progression_history: Vec<ProgressionEvent>,
    /// Origin bonus points that actually landed, after clamping.
    pub origin_bonus: Vec<(Attribute, i32)>,
    /// Role bonus points that actually landed, after clamping.
    pub role_bonus: Vec<(Skill, i32)>,
}

impl CharacterSnapshot {
    /// Check that the snapshot describes a reachable state.
    pub fn validate(&self) -> CharacterResult<()> {
        if !self.attributes.in_range() {
            return Err(invalid("attribute out of range"));
        }
        if !self.skills.in_range() {
            return Err(invalid("skill out of range"));
        }
        if self.stats.level == 0 {
            return Err(invalid("level must be at least 1"));
        }
        if !(0..=MAX_CRED).contains(&self.stats.cred_rating) {
            return Err(invalid("cred rating out of range"));
        }
        if self.stats.humanity_loss > self.stats.max_humanity {
            return Err(invalid("humanity loss exceeds maximum"));
        }
        let catalog = perk_catalog();
        for (id, state) in &self.perks {
            if !catalog.iter().any(|p| &p.id == id) {
                return Err(invalid(&format!("unknown perk '{id}'")));
            }
            if state.learned && !state.unlocked {
                return Err(invalid(&format!("perk '{id}' learned but not unlocked")));
            }
        }
        let origin_table = self.background.origin.map_or(&[][..], |o| o.attribute_bonuses());
        if !applied_within(&self.origin_bonus, origin_table) {
            return Err(invalid("origin bonus does not match the origin"));
        }
        let role_table = self.background.role.map_or(&[][..], |r| r.skill_bonuses());
        if !applied_within(&self.role_bonus, role_table) {
            return Err(invalid("role bonus does not match the role"));
        }
        match (self.background.role, &self.background.specialization) {
            (None, Some(name)) => Err(invalid(&format!("'{name}' set without a role"))),
            (Some(role), Some(name)) if !role.specializations().contains(&name.as_str()) => {
                Err(invalid(&format!("'{name}' does not belong to {role}")))
            }
            _ => Ok(()),
        }
    }
}

/// Every applied entry names a bonus from `table` and lies between zero and
/// the full bonus.
fn applied_within<K: PartialEq>(applied: &[(K, i32)], table: &[(K, i32)]) -> bool {
    applied.iter().all(|(key, points)| {
        table
            .iter()
            .any(|(k, bonus)| k == key && (0..=*bonus).contains(points))
    })
}

fn invalid(reason: &str) -> CharacterError {
    CharacterError::InvalidSnapshot(reason.to_string())
}

/// Owns attributes, skills, stats, perks, and identity for one character.
///
/// Every mutation recomputes derived stats and perk unlocks. Read accessors
/// return owned copies.
#[derive(Debug, Clone)]
pub struct CharacterProgression {
    attributes: CharacterAttributes,
    skills: CharacterSkills,
    stats: CharacterStats,
    background: CharacterBackground,
    perks: Vec<Perk>,
    history: Vec<ProgressionEvent>,
    origin_bonus: Vec<(Attribute, i32)>,
    role_bonus: Vec<(Skill, i32)>,
}

impl Default for CharacterProgression {
    fn default() -> Self {
        Self::new()
    }
}

impl CharacterProgression {
    /// A fresh level 1 character.
    pub fn new() -> Self {
        let mut store = Self {
            attributes: CharacterAttributes::default(),
            skills: CharacterSkills::default(),
            stats: CharacterStats::default(),
            background: CharacterBackground::default(),
            perks: perk_catalog(),
            history: Vec::new(),
            origin_bonus: Vec::new(),
            role_bonus: Vec::new(),
        };
        store.recompute();
        store
    }

    /// Return to the initial state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    // -- Accessors -----------------------------------------------------------

    /// Attribute scores.
    pub fn attributes(&self) -> CharacterAttributes {
        self.attributes.clone()
    }

    /// Skill scores.
    pub fn skills(&self) -> CharacterSkills {
        self.skills.clone()
    }

    /// Stats, including derived numbers.
    pub fn stats(&self) -> CharacterStats {
        self.stats.clone()
    }

    /// Identity data.
    pub fn background(&self) -> CharacterBackground {
        self.background.clone()
    }

    /// Every perk with its current flags.
    pub fn perks(&self) -> Vec<Perk> {
        self.perks.clone()
    }

    /// Progression history, oldest first.
    pub fn progression_history(&self) -> Vec<ProgressionEvent> {
        self.history.clone()
    }

    // -- Identity ------------------------------------------------------------

    /// Set the character name. Blank names are ignored.
    pub fn set_name(&mut self, name: &str) {
        let name = name.trim();
        if !name.is_empty() {
            self.background.name = name.to_string();
        }
    }

    /// Set the free-text backstory.
    pub fn set_background_story(&mut self, story: &str) {
        self.background.background_story = story.trim().to_string();
    }

    /// Set appearance notes.
    pub fn set_appearance(&mut self, appearance: Appearance) {
        self.background.appearance = appearance;
    }

    /// Choose an origin and apply its attribute bonuses.
    ///
    /// A previous origin's bonuses are reverted first. Only the points that
    /// landed are reverted, so a bonus clamped at the cap costs nothing.
    pub fn set_origin(&mut self, origin: Origin) -> ActionResult {
        for (attribute, points) in std::mem::take(&mut self.origin_bonus) {
            self.attributes.adjust(attribute, -points);
        }
        for &(attribute, bonus) in origin.attribute_bonuses() {
            let before = self.attributes.get(attribute);
            let after = self.attributes.adjust(attribute, bonus);
            self.origin_bonus
                .push((attribute, i32::from(after) - i32::from(before)));
        }
        self.background.origin = Some(origin);
        self.background.background_hooks = origin
            .background_hooks()
            .iter()
            .map(|h| h.to_string())
            .collect();
        self.record(ProgressionKind::OriginSelected, format!("Origin: {origin}"));
        self.recompute();
        tracing::info!(%origin, "origin selected");
        ActionResult::ok(format!("Origin set to {origin}"))
    }

    /// Choose a role, apply its skill bonuses, and clear the specialization.
    ///
    /// A previous role's bonuses are reverted first, limited to the points
    /// that landed.
    pub fn set_role(&mut self, role: Role) -> ActionResult {
        for (skill, points) in std::mem::take(&mut self.role_bonus) {
            self.skills.adjust(skill, -points);
        }
        for &(skill, bonus) in role.skill_bonuses() {
            let before = self.skills.get(skill);
            let after = self.skills.adjust(skill, bonus);
            self.role_bonus.push((skill, i32::from(after) - i32::from(before)));
        }
        self.background.role = Some(role);
        self.background.specialization = None;
        self.record(ProgressionKind::RoleSelected, format!("Role: {role}"));
        self.recompute();
        tracing::info!(%role, "role selected");
        ActionResult::ok(format!("Role set to {role}"))
    }

    /// Pick a specialization of the current role. Allowed once per role.
    pub fn set_specialization(&mut self, name: &str) -> ActionResult {
        ActionResult::from_result(self.try_set_specialization(name))
    }

    fn try_set_specialization(&mut self, name: &str) -> CharacterResult<String> {
        let role = self.background.role.ok_or(CharacterError::NoRoleSelected)?;
        if let Some(current) = &self.background.specialization {
            return Err(CharacterError::SpecializationAlreadySet(current.clone()));
        }
        let canonical = role
            .specializations()
            .iter()
            .find(|s| s.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| CharacterError::InvalidSpecialization(name.trim().to_string()))?;
        self.background.specialization = Some(canonical.to_string());
        self.record(
            ProgressionKind::SpecializationSelected,
            format!("Specialization: {canonical}"),
        );
        Ok(format!("Specialized as {canonical}"))
    }

    // -- Point spending ------------------------------------------------------

    /// Spend one attribute point on `attribute`.
    pub fn increase_attribute(&mut self, attribute: Attribute) -> ActionResult {
        ActionResult::from_result(self.try_increase_attribute(attribute))
    }

    fn try_increase_attribute(&mut self, attribute: Attribute) -> CharacterResult<String> {
        if self.stats.attribute_points == 0 {
            return Err(CharacterError::NoAttributePoints);
        }
        if self.attributes.get(attribute) >= MAX_SCORE {
            return Err(CharacterError::AttributeAtCap(attribute));
        }
        self.stats.attribute_points -= 1;
        let value = self.attributes.adjust(attribute, 1);
        self.record(
            ProgressionKind::AttributeIncreased,
            format!("{attribute} increased to {value}"),
        );
        self.recompute();
        tracing::debug!(%attribute, value, "attribute increased");
        Ok(format!("{attribute} increased to {value}"))
    }

    /// Spend one skill point on `skill`.
    pub fn increase_skill(&mut self, skill: Skill) -> ActionResult {
        ActionResult::from_result(self.try_increase_skill(skill))
    }

    fn try_increase_skill(&mut self, skill: Skill) -> CharacterResult<String> {
        if self.stats.skill_points == 0 {
            return Err(CharacterError::NoSkillPoints);
        }
        if self.skills.get(skill) >= MAX_SCORE {
            return Err(CharacterError::SkillAtCap(skill));
        }
        self.stats.skill_points -= 1;
        let value = self.skills.adjust(skill, 1);
        self.record(
            ProgressionKind::SkillIncreased,
            format!("{skill} increased to {value}"),
        );
        self.recompute();
        tracing::debug!(%skill, value, "skill increased");
        Ok(format!("{skill} increased to {value}"))
    }

    /// Learn an unlocked perk, paying its skill point cost.
    pub fn learn_perk(&mut self, id: &str) -> ActionResult {
        ActionResult::from_result(self.try_learn_perk(id))
    }

    fn try_learn_perk(&mut self, id: &str) -> CharacterResult<String> {
        let available = self.stats.skill_points;
        let perk = self
            .perks
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CharacterError::UnknownPerk(id.to_string()))?;
        if perk.learned {
            return Err(CharacterError::PerkAlreadyLearned(perk.name.clone()));
        }
        if !perk.unlocked {
            return Err(CharacterError::PerkLocked {
                name: perk.name.clone(),
                requirement: perk.requirement.to_string(),
            });
        }
        if available < perk.cost {
            return Err(CharacterError::NotEnoughSkillPoints {
                needed: perk.cost,
                available,
            });
        }
        perk.learned = true;
        let cost = perk.cost;
        let name = perk.name.clone();
        self.stats.skill_points -= cost;
        self.record(ProgressionKind::PerkLearned, format!("Learned {name}"));
        self.recompute();
        tracing::info!(perk = id, "perk learned");
        Ok(format!("Learned {name}"))
    }

    // -- Experience ----------------------------------------------------------

    /// Add experience, applying perk bonuses, and level up as many times as
    /// the total allows. Returns every level gained, in order.
    pub fn add_experience(&mut self, amount: u64) -> Vec<LevelUpEvent> {
        let bonus = u64::from(experience_bonus_percent(&self.perks));
        let gained = amount.saturating_mul(100 + bonus) / 100;
        self.stats.experience = self.stats.experience.saturating_add(gained);

        let mut events = Vec::new();
        while self.stats.experience >= self.stats.experience_to_next {
            self.stats.experience -= self.stats.experience_to_next;
            self.stats.level += 1;
            let level = self.stats.level;
            let eddies = i64::from(level) * EDDIES_PER_LEVEL;
            self.stats.attribute_points += ATTRIBUTE_POINTS_PER_LEVEL;
            self.stats.skill_points += SKILL_POINTS_PER_LEVEL;
            self.stats.experience_to_next = experience_for_level(level);
            self.stats.eddies = self.stats.eddies.saturating_add(eddies);
            self.stats.health.fill();
            self.stats.stamina.fill();
            self.record(ProgressionKind::LevelUp, format!("Reached level {level}"));
            tracing::info!(level, "level up");
            events.push(LevelUpEvent {
                level,
                attribute_points: ATTRIBUTE_POINTS_PER_LEVEL,
                skill_points: SKILL_POINTS_PER_LEVEL,
                eddies,
            });
        }
        self.recompute();
        events
    }

    // -- Pools ---------------------------------------------------------------

    /// Lose health. Reports whether health reached zero.
    pub fn take_damage(&mut self, amount: u32) -> DamageOutcome {
        let delta = i32::try_from(amount).unwrap_or(i32::MAX);
        let health = self.stats.health.adjust(-delta);
        let died = self.stats.health.is_empty();
        if died {
            tracing::warn!("health reached zero");
        }
        DamageOutcome { health, died }
    }

    /// Restore health. Returns the new value.
    pub fn heal(&mut self, amount: u32) -> i32 {
        self.stats
            .health
            .adjust(i32::try_from(amount).unwrap_or(i32::MAX))
    }

    /// Spend stamina. Returns false and changes nothing if there is not
    /// enough.
    pub fn use_stamina(&mut self, amount: u32) -> bool {
        let amount = i32::try_from(amount).unwrap_or(i32::MAX);
        if self.stats.stamina.current < amount {
            return false;
        }
        self.stats.stamina.adjust(-amount);
        true
    }

    /// Restore stamina. Returns the new value.
    pub fn restore_stamina(&mut self, amount: u32) -> i32 {
        self.stats
            .stamina
            .adjust(i32::try_from(amount).unwrap_or(i32::MAX))
    }

    /// Add humanity loss, capped at the maximum. Returns the new total.
    pub fn add_humanity_loss(&mut self, amount: u32) -> u32 {
        self.stats.humanity_loss = self
            .stats
            .humanity_loss
            .saturating_add(amount)
            .min(self.stats.max_humanity);
        self.stats.humanity_loss
    }

    // -- Money and reputation ------------------------------------------------

    /// Add (or with a negative amount, remove) eddies without a floor check.
    pub fn add_eddies(&mut self, amount: i64) -> i64 {
        self.stats.eddies = self.stats.eddies.saturating_add(amount);
        self.stats.eddies
    }

    /// Spend eddies. Rejected if the balance is too low.
    pub fn spend_eddies(&mut self, amount: i64) -> ActionResult {
        let available = self.stats.eddies;
        if amount > available {
            return ActionResult::from_result(Err(CharacterError::InsufficientEddies {
                needed: amount,
                available,
            }));
        }
        self.stats.eddies -= amount.max(0);
        ActionResult::ok(format!("Spent {amount} eddies"))
    }

    /// Adjust street cred, clamped to 0..=100. Returns the new rating.
    pub fn adjust_cred(&mut self, delta: i32) -> i32 {
        self.stats.cred_rating = self
            .stats
            .cred_rating
            .saturating_add(delta)
            .clamp(0, MAX_CRED);
        self.stats.cred_rating
    }

    // -- Prompt context ------------------------------------------------------

    /// One-paragraph summary of the character for narrative prompts.
    pub fn character_info(&self) -> String {
        let bg = &self.background;
        let s = &self.stats;
        let attributes = Attribute::ALL
            .iter()
            .map(|a| format!("{a} {}", self.attributes.get(*a)))
            .collect::<Vec<_>>()
            .join(", ");
        let learned: Vec<&str> = self
            .perks
            .iter()
            .filter(|p| p.learned)
            .map(|p| p.name.as_str())
            .collect();
        let mut info = format!(
            "{}, {}. Level {}. Health {}. Stamina {}. Eddies {}. Street cred {}. Attributes: {}.",
            bg.name,
            bg.identity_line(),
            s.level,
            s.health,
            s.stamina,
            s.eddies,
            s.cred_rating,
            attributes,
        );
        if !learned.is_empty() {
            info.push_str(&format!(" Perks: {}.", learned.join(", ")));
        }
        if !bg.background_story.is_empty() {
            info.push_str(&format!(" Background: {}", bg.background_story));
        }
        info
    }

    // -- Persistence ---------------------------------------------------------

    /// Capture the whole store.
    pub fn snapshot(&self) -> CharacterSnapshot {
        CharacterSnapshot {
            attributes: self.attributes.clone(),
            skills: self.skills.clone(),
            stats: self.stats.clone(),
            background: self.background.clone(),
            perks: self
                .perks
                .iter()
                .map(|p| {
                    (
                        p.id.clone(),
                        PerkState {
                            unlocked: p.unlocked,
                            learned: p.learned,
                        },
                    )
                })
                .collect(),
            progression_history: self.history.clone(),
            origin_bonus: self.origin_bonus.clone(),
            role_bonus: self.role_bonus.clone(),
        }
    }

    /// Replace the whole store with a snapshot. Nothing changes if the
    /// snapshot is invalid.
    pub fn restore(&mut self, snapshot: CharacterSnapshot) -> CharacterResult<()> {
        snapshot.validate()?;
        let mut perks = perk_catalog();
        for perk in &mut perks {
            if let Some(state) = snapshot.perks.get(&perk.id) {
                perk.unlocked = state.unlocked;
                perk.learned = state.learned;
            }
        }
        self.attributes = snapshot.attributes;
        self.skills = snapshot.skills;
        self.stats = snapshot.stats;
        self.background = snapshot.background;
        self.perks = perks;
        self.history = snapshot.progression_history;
        self.origin_bonus = snapshot.origin_bonus;
        self.role_bonus = snapshot.role_bonus;
        self.recompute();
        Ok(())
    }

    // -- Internals -----------------------------------------------------------

    fn record(&mut self, kind: ProgressionKind, detail: String) {
        self.history.push(ProgressionEvent {
            timestamp: Utc::now(),
            kind,
            detail,
        });
        if self.history.len() > HISTORY_LIMIT {
            let excess = self.history.len() - HISTORY_LIMIT;
            self.history.drain(..excess);
        }
    }

    fn recompute(&mut self) {
        for perk in self.perks.iter_mut().filter(|p| !p.unlocked) {
            if perk.requirement.is_met(&self.attributes, &self.skills) {
                perk.unlocked = true;
                tracing::debug!(perk = %perk.id, "perk unlocked");
            }
        }
        self.stats.combat = CombatStats::derive(&self.attributes, &self.skills, &self.perks);
        self.stats.health.set_max(max_health_for(&self.attributes));
        self.stats
            .stamina
            .set_max(max_stamina_for(&self.attributes, &self.perks));
    }
}
