//! Error types for the search client.

use std::time::Duration;

use thiserror::Error;

/// Failures reaching the search engine.
#[derive(Debug, Error)]
pub enum TransportError {
    /// No response within the request timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Network failure (DNS, connect, reset, ...)
    #[error("Connection failed: {0}")]
    Connection(String),

    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(String),
}

/// Errors returned by [`crate::SearchClient`].
///
/// `Display` is the single message shown to the user.
#[derive(Debug, Error)]
pub enum ClientError {
    /// API URL or key missing; no request was attempted
    #[error("{0}")]
    NotConfigured(String),

    /// Transport failure, passed through unchanged
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Non-200 response from the engine
    #[error("{message}")]
    Engine { status: u16, message: String },

    /// Request body could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Caller sent no query text
    #[error("No search query provided")]
    EmptyQuery,
}

impl ClientError {
    /// Whether the failure happened before any network call.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ClientError::NotConfigured(_) | ClientError::EmptyQuery | ClientError::Serialization(_)
        )
    }
}
