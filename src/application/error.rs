//! Application-level errors (wraps domain errors)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("no tree loaded")]
    NotInitialized,

    #[error("invalid edit '{op}': {message}")]
    InvalidEdit { op: String, message: String },

    #[error("cannot import tree from {source_name}: {source}")]
    Import {
        source_name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot serialize tree: {0}")]
    Export(#[source] serde_json::Error),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("not a file: {0}")]
    NotAFile(PathBuf),

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
