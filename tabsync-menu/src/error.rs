//! Error types for menu loading.

use thiserror::Error;

/// Result type for menu operations.
pub type MenuResult<T> = Result<T, MenuError>;

/// Errors that can occur while fetching menu data.
#[derive(Debug, Error)]
pub enum MenuError {
    /// Transport-level HTTP failure (connect, timeout, body read).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("unexpected status: {0}")]
    Status(u16),

    /// The response body was not valid JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
