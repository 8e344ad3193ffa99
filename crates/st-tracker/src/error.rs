//! Error types for the tracker.

use st_core::CoreError;
use thiserror::Error;

/// Result type for tracker operations.
pub type TrackerResult<T> = Result<T, TrackerError>;

/// Why a dice roll cannot be pushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PushBlocked {
    /// Nothing has been rolled since the last name change.
    #[error("no roll to push")]
    NoRoll,
    /// The last roll is already a push.
    #[error("the roll has already been pushed")]
    AlreadyPushed,
    /// The last roll triggered panic.
    #[error("a roll that triggered panic cannot be pushed")]
    PanicTriggered,
}

/// Errors that can occur while tracking stress.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// The last roll cannot be pushed.
    #[error("cannot push: {0}")]
    PushUnavailable(PushBlocked),

    /// Invalid core data such as a malformed panic table.
    #[error(transparent)]
    Core(#[from] CoreError),
}
