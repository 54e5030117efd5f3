//! Clamped resource pools (health, stamina).

use serde::{Deserialize, Serialize};

/// A numeric resource clamped between zero and a maximum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Current value.
    pub current: i32,
    /// Maximum value.
    pub max: i32,
}

impl Track {
    /// Create a full track.
    pub fn full(max: i32) -> Self {
        let max = max.max(1);
        Self { current: max, max }
    }

    /// Adjust by a delta, clamping to `0..=max`. Returns the new value.
    pub fn adjust(&mut self, delta: i32) -> i32 {
        self.current = self.current.saturating_add(delta).clamp(0, self.max);
        self.current
    }

    /// Refill to the maximum.
    pub fn fill(&mut self) {
        self.current = self.max;
    }

    /// Change the maximum. Growth is also added to the current value;
    /// shrinking clamps it.
    pub fn set_max(&mut self, max: i32) {
        let max = max.max(1);
        let growth = max - self.max;
        self.max = max;
        if growth > 0 {
            self.current += growth;
        }
        self.current = self.current.clamp(0, self.max);
    }

    /// Returns true at zero.
    pub fn is_empty(&self) -> bool {
        self.current <= 0
    }

    /// Returns true at the maximum.
    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }
}

impl std::fmt::Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.current, self.max)
    }
}
