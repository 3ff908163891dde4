//! Common error types for Polyglotas

use thiserror::Error;

/// Common result type for Polyglotas operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across Polyglotas crates
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport error talking to the backend (wraps reqwest::Error)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON payload
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
