//! Error handling module for ClipTrim

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Main error type for ClipTrim operations
#[derive(Error, Debug)]
pub enum ClipTrimError {
    /// Domain rule or port failure
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Catalog, storage or config file could not be parsed as JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for ClipTrim operations
pub type ClipTrimResult<T> = std::result::Result<T, ClipTrimError>;
