//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`VerdantError`] at the port boundary. The two IO-facing variants carry
//! boxed sources so adapters don't leak their concrete error types into the
//! domain.

use std::error::Error;

/// Top-level error shared across port boundaries.
#[derive(Debug, thiserror::Error)]
pub enum VerdantError {
    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A requested record does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// The persistence layer failed. The database is the source of truth,
    /// so these abort the calling operation.
    #[error("storage error")]
    Storage(#[source] Box<dyn Error + Send + Sync>),

    /// The message bus failed. The mirror is best-effort, so callers log
    /// these and continue; they never abort a CRUD operation.
    #[error("bus error")]
    Bus(#[source] Box<dyn Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("species must not be empty")]
    EmptySpecies,

    #[error("location code must not be empty")]
    EmptyLocationCode,
}

/// A lookup failed: no `entity` with the given `id`.
#[derive(Debug, thiserror::Error)]
#[error("{entity} with id {id} not found")]
pub struct NotFoundError {
    /// Human-readable entity kind (e.g. `"Farm"`).
    pub entity: &'static str,
    /// The id that was looked up, rendered as text.
    pub id: String,
}
