//! Error types for outreach-rs

use thiserror::Error;

/// Result type alias for outreach operations
pub type Result<T> = std::result::Result<T, OutreachError>;

#[derive(Error, Debug)]
pub enum OutreachError {
    /// Malformed or incomplete request data
    #[error("Validation error: {0}")]
    Validation(String),

    /// Draft (or other keyed entity) does not exist
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Template placeholder with no matching field
    #[error("Missing template field: {0}")]
    MissingField(String),

    /// Template text that cannot be parsed into literal text and placeholders
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
