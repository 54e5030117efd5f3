//! Typed signals extracted from one narrative passage.

use serde::{Deserialize, Serialize};

/// A scripted story beat recognised from a fixed trigger phrase.
///
/// Triggers carry no quantities; the synchronization layer decides what
/// each one does to the game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoryTrigger {
    /// The player is jumped or fired upon.
    Ambush,
    /// The player stumbles on something worth picking up.
    Scavenge,
    /// The player meets or talks to someone.
    NpcEncounter,
}

impl std::fmt::Display for StoryTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ambush => write!(f, "Ambush"),
            Self::Scavenge => write!(f, "Scavenge"),
            Self::NpcEncounter => write!(f, "NPC Encounter"),
        }
    }
}

/// Every signal found in a passage, plus summary flags.
///
/// The default value is the "nothing happened" result: all counters zero,
/// all lists empty, all flags false.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryUpdates {
    /// True if experience, health, eddies, or cred changed.
    pub stats_updated: bool,
    /// True if the passage moved the player somewhere.
    pub location_changed: bool,
    /// True if any item was found or lost.
    pub inventory_changed: bool,
    /// True if the passage describes fighting or weapons.
    pub combat_occurred: bool,
    /// Noun phrases of items the player picked up.
    pub items_found: Vec<String>,
    /// Noun phrases of items the player lost.
    pub items_lost: Vec<String>,
    /// Total experience awarded.
    pub experience_gained: u32,
    /// Total damage the player dealt.
    pub damage_dealt: u32,
    /// Total damage the player took.
    pub damage_taken: u32,
    /// The destination, either a location id or a lower-cased place phrase.
    pub new_location: Option<String>,
    /// Net change in eddies.
    pub eddies_delta: i64,
    /// Net change in street cred.
    pub cred_delta: i32,
    /// Names of characters the player met.
    pub npc_encounters: Vec<String>,
    /// Sentences that read like a job, gig, or mission hook.
    pub plot_points: Vec<String>,
    /// Trigger phrases that matched, each at most once.
    pub triggers: Vec<StoryTrigger>,
}

impl StoryUpdates {
    /// Returns true if subscribers should hear about this update.
    pub fn has_changes(&self) -> bool {
        self.stats_updated || self.location_changed || self.inventory_changed
    }

    /// Returns true if the given trigger fired.
    pub fn has_trigger(&self, trigger: StoryTrigger) -> bool {
        self.triggers.contains(&trigger)
    }

    /// Recompute the summary flags from the raw signals.
    pub fn refresh_flags(&mut self) {
        self.stats_updated = self.experience_gained > 0
            || self.damage_taken > 0
            || self.eddies_delta != 0
            || self.cred_delta != 0;
        self.inventory_changed = !self.items_found.is_empty() || !self.items_lost.is_empty();
        self.location_changed = self.new_location.is_some();
    }
}
