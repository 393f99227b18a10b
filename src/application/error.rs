//! Application-level errors (wraps domain errors)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("snapshot not found: {0}")]
    SnapshotNotFound(PathBuf),

    #[error("snapshot already exists: {0}")]
    SnapshotExists(PathBuf),

    #[error("invalid snapshot {path}: {message}")]
    Snapshot { path: PathBuf, message: String },

    #[error("location not found: {0}")]
    LocationNotFound(String),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
