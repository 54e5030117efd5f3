//! Error types for save files.

use thiserror::Error;

/// Result type for save and load.
pub type SyncResult<T> = Result<T, SyncError>;

/// Reasons a save blob could not be written or read.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The blob is not valid JSON or does not match the save layout.
    #[error("malformed save: {0}")]
    Json(#[from] serde_json::Error),

    /// The blob was written by an incompatible version.
    #[error("unsupported save version: {found}")]
    VersionMismatch {
        /// Version string found in the blob.
        found: String,
    },

    /// A required top-level key is absent.
    #[error("save is missing '{0}'")]
    MissingSection(&'static str),

    /// A store rejected its part of the save.
    #[error("{0}")]
    InvalidSnapshot(String),
}

impl From<nl_character::CharacterError> for SyncError {
    fn from(e: nl_character::CharacterError) -> Self {
        Self::InvalidSnapshot(e.to_string())
    }
}

impl From<nl_inventory::InventoryError> for SyncError {
    fn from(e: nl_inventory::InventoryError) -> Self {
        Self::InvalidSnapshot(e.to_string())
    }
}

impl From<nl_map::MapError> for SyncError {
    fn from(e: nl_map::MapError) -> Self {
        Self::InvalidSnapshot(e.to_string())
    }
}
