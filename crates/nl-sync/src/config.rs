//! Configuration for a game state manager.

use nl_inventory::inventory::{DEFAULT_MAX_WEIGHT, DEFAULT_SLOTS};

/// Configuration for a [`crate::GameStateManager`].
#[derive(Debug, Clone, PartialEq)]
pub struct SyncConfig {
    /// RNG seed for trigger rolls.
    pub seed: u64,
    /// Number of inventory slots.
    pub inventory_slots: usize,
    /// Initial inventory weight limit.
    pub max_weight: f64,
    /// Keep the weight limit equal to the character's carry capacity.
    pub sync_weight_to_carry_capacity: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            inventory_slots: DEFAULT_SLOTS,
            max_weight: DEFAULT_MAX_WEIGHT,
            sync_weight_to_carry_capacity: true,
        }
    }
}

impl SyncConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the slot count (at least 1).
    pub fn with_inventory_slots(mut self, slots: usize) -> Self {
        self.inventory_slots = slots.max(1);
        self
    }

    /// Set the initial weight limit (never negative).
    pub fn with_max_weight(mut self, max_weight: f64) -> Self {
        self.max_weight = max_weight.max(0.0);
        self
    }

    /// Turn carry-capacity syncing on or off.
    pub fn with_weight_sync(mut self, enabled: bool) -> Self {
        self.sync_weight_to_carry_capacity = enabled;
        self
    }
}
