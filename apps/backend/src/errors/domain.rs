//! Domain-level error type used across the round domain and the session
//! engine.
//!
//! This error type is HTTP- and DB-agnostic. Handlers should return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the provided `From<DomainError> for AppError` implementation.

use thiserror::Error;

use crate::domain::round::{PICK_MAX, PICK_MIN};

/// Central domain error type.
///
/// The HTTP surface maps every variant to a 400 response with a stable
/// code; the state-conflict variants are rejected synchronously and
/// leave round state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Submitted pick is not an integer in the playable range.
    #[error("invalid pick: must be an integer between {PICK_MIN} and {PICK_MAX}")]
    InvalidPick,
    /// No round is currently accepting this operation.
    #[error("no active round")]
    NoActiveRound,
    /// Identity is already registered in the current round.
    #[error("already joined the current round")]
    AlreadyJoined,
    /// Identity has not joined the current round.
    #[error("not joined the current round")]
    NotJoined,
    /// A pick was already recorded for this identity; picks are immutable.
    #[error("a pick was already submitted for this round")]
    AlreadyPicked,
    /// No round has ever been resolved.
    #[error("no resolved round yet")]
    NoResolvedRound,
}

impl DomainError {
    /// Stable machine-readable code, unique per variant.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::InvalidPick => "INVALID_PICK",
            DomainError::NoActiveRound => "NO_ACTIVE_ROUND",
            DomainError::AlreadyJoined => "ALREADY_JOINED",
            DomainError::NotJoined => "NOT_JOINED",
            DomainError::AlreadyPicked => "ALREADY_PICKED",
            DomainError::NoResolvedRound => "NO_RESOLVED_ROUND",
        }
    }
}
