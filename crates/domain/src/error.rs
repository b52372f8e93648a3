//! Domain error types.

use thiserror::Error;

/// Errors raised by entity constructors, mutators, and the order state
/// machine.
///
/// Both variants carry the exact message surfaced to callers. Absence of an
/// entity is never an error in this layer; repositories and services model
/// it with `Option` / `bool`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A field value violated an invariant at construction or update time.
    #[error("{0}")]
    Validation(&'static str),

    /// An operation was attempted from a lifecycle state that forbids it.
    #[error("{0}")]
    InvalidState(&'static str),
}

impl DomainError {
    /// Returns the caller-visible message.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Validation(message) | Self::InvalidState(message) => message,
        }
    }
}
