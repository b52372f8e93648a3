//! Service error types.

use domain::DomainError;
use storage::StorageError;
use thiserror::Error;

/// Errors surfaced by the application services.
///
/// Domain errors pass through transparently so callers see the exact
/// validation or state-machine message; absence of an entity is reported as
/// `Option::None` / `false` by the operations themselves, never as an error.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// An entity invariant or state-machine guard rejected the request.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The persistence collaborator failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
