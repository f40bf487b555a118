//! Error types for roster operations and persistence.
//!
//! Validation failures abort an operation without touching state. Stale or
//! unknown ids are not errors: operations on them return `Ok(false)`.

use thiserror::Error;

use super::side::Side;

/// Reasons a roster operation was refused.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RosterError {
    /// A registrant name was blank after trimming.
    #[error("name must not be empty")]
    EmptyName,

    /// The rotation queue has nobody to place.
    #[error("queue empty")]
    QueueEmpty,

    /// A squad is too small to be rotated out.
    #[error("insufficient squad size: {side} has {size} of {required} players")]
    InsufficientSquadSize { side: Side, size: usize, required: usize },

    /// Not enough queued players to refill a squad.
    #[error("insufficient queue: {available} of {required} players available")]
    InsufficientQueue { available: usize, required: usize },

    /// A rotation operation is still in flight.
    #[error("rotation operation already in progress")]
    Busy,

    /// Completion was requested with nothing scheduled.
    #[error("no rotation operation pending")]
    NoPendingOperation,
}

impl RosterError {
    /// Whether the caller may retry the same call later and expect success
    /// without changing anything else.
    pub fn is_transient(&self) -> bool {
        matches!(self, RosterError::Busy)
    }
}

/// Failures of the persistence collaborator.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The key-value backend failed.
    #[error("storage backend error: {0}")]
    Backend(String),

    /// A stored record was not valid JSON for its collection.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
