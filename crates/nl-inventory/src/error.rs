//! Error types for the inventory.

/// Reasons an inventory operation is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    /// The item is not in the inventory.
    #[error("you don't have '{0}'")]
    ItemNotFound(String),

    /// The item cannot be used.
    #[error("{0} can't be used")]
    NotUsable(String),

    /// The item cannot be equipped.
    #[error("{0} can't be equipped")]
    NotEquippable(String),

    /// A snapshot failed validation on restore.
    #[error("invalid inventory snapshot: {0}")]
    InvalidSnapshot(String),
}

/// Convenience result type for inventory operations.
pub type InventoryResult<T> = Result<T, InventoryError>;
