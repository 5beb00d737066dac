//! Error types shared across the parish search crates.

use thiserror::Error;

/// Errors raised while loading settings or parsing domain values.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
