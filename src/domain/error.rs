//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the location hierarchy rules.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("duplicate location identifier: {0}")]
    DuplicateIdentifier(String),

    #[error("cycle detected in location hierarchy at: {0}")]
    CyclicHierarchy(String),

    #[error("unknown location kind: {0}")]
    UnknownKind(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
