//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`StapleError`] via `From`.

use std::fmt;

/// Top-level error returned by use-cases and ports.
#[derive(Debug, thiserror::Error)]
pub enum StapleError {
    /// Input failed a domain invariant.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The addressed record does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// Every id up to `u64::MAX` is taken.
    #[error("no request id left to assign")]
    IdsExhausted,

    /// The persistence layer failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// One or more required fields were absent or blank.
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// The status is not one of the supported values.
    #[error("Invalid status: {0}")]
    InvalidStatus(String),
}

/// A lookup by id found nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotFoundError {
    /// Kind of record that was looked up.
    pub entity: &'static str,
    /// The id that was requested, as text.
    pub id: String,
}

impl fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} not found: {}", self.entity, self.id)
    }
}

impl std::error::Error for NotFoundError {}
