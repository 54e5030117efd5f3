//! Success-or-reason results for player actions.

use serde::{Deserialize, Serialize};

/// Result of an operation that can be rejected by game rules.
///
/// Rejections (not enough points, stat at its cap, unknown id, and so on)
/// are ordinary outcomes, not errors: callers check `success` and show
/// `message` to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    /// Whether the action was applied.
    pub success: bool,
    /// Human-readable description of what happened or why it did not.
    pub message: String,
}

impl ActionResult {
    /// An applied action.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// A rejected action.
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }

    /// Build a result from a store-internal `Result`, using the error's
    /// display text as the rejection message.
    pub fn from_result<E: std::fmt::Display>(result: Result<String, E>) -> Self {
        match result {
            Ok(message) => Self::ok(message),
            Err(e) => Self::fail(e.to_string()),
        }
    }
}

impl std::fmt::Display for ActionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}
