//! Failure taxonomy for catalog requests.

use thiserror::Error;

/// Why a product fetch failed.
///
/// The cause is kept for logging only. Every variant collapses into the same
/// `Error` view state, so callers should not branch on it for display.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Catalog returned status: {0}")]
    Status(u16),
    #[error("Malformed product body: {0}")]
    MalformedBody(String),
}

impl FetchError {
    /// Short label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Client(_) => "client",
            FetchError::Network(_) => "network",
            FetchError::Status(_) => "status",
            FetchError::MalformedBody(_) => "malformed_body",
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::MalformedBody(err.to_string())
    }
}
