// Domain errors - Error types for the domain layer

use thiserror::Error;

/// Domain-specific error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Invalid arguments provided
    #[error("Bad arguments: {0}")]
    BadArgs(String),

    /// Catalog request arrived without a page number
    #[error("no page parameter")]
    MissingPage,

    /// Trim window violates ordering or minimum gap
    #[error("Invalid trim window: {0}")]
    InvalidTrim(String),

    /// Catalog source could not be read
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// Catalog source was read but could not be parsed
    #[error("Catalog malformed: {0}")]
    CatalogMalformed(String),

    /// Widget runtime never became ready or refused to create a widget
    #[error("Widget runtime unavailable: {0}")]
    RuntimeUnavailable(String),

    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {0}")]
    ConfigError(String),
}
