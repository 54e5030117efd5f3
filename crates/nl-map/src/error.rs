//! Error types for the map.

/// Reasons a map operation is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    /// No location with this id exists.
    #[error("unknown location: {0}")]
    UnknownLocation(String),

    /// The player is already there.
    #[error("you're already at {0}")]
    AlreadyHere(String),

    /// The location has not been unlocked.
    #[error("{0} is locked")]
    Locked(String),

    /// The location is not connected to the current one.
    #[error("{to} is not reachable from {from}")]
    NotConnected {
        /// Current location name.
        from: String,
        /// Destination name.
        to: String,
    },

    /// No fast-travel terminal has been discovered yet.
    #[error("fast travel is not available yet")]
    FastTravelUnavailable,

    /// Fast travel needs a discovered destination.
    #[error("{0} has not been discovered")]
    NotDiscovered(String),

    /// The player does not meet the location's requirement.
    #[error("{name} requires {requirement}")]
    AccessDenied {
        /// Location name.
        name: String,
        /// First unmet requirement.
        requirement: String,
    },

    /// No marker with this id exists.
    #[error("unknown marker: {0}")]
    UnknownMarker(String),

    /// The marker was already completed.
    #[error("{0} is already complete")]
    MarkerCompleted(String),

    /// A snapshot failed validation on restore.
    #[error("invalid map snapshot: {0}")]
    InvalidSnapshot(String),
}

/// Convenience result type for map operations.
pub type MapResult<T> = Result<T, MapError>;
