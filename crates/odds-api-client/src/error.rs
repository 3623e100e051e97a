//! Error types for the odds client.

use thiserror::Error;


/// Client error types.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// WebSocket error.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] Box<tokio_tungstenite::tungstenite::Error>),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The API key was rejected (HTTP 401).
    #[error("Invalid API key")]
    InvalidApiKey,

    /// Rate limit exceeded (HTTP 429).
    #[error("Rate limit exceeded - please wait before retrying")]
    RateLimited,

    /// Resource not found (HTTP 404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request timed out.
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// API returned an error response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from API.
        message: String,
    },

    /// Feed filter parameters are out of range.
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// Connection closed unexpectedly.
    #[error("Connection closed: {0}")]
    ConnectionClosed(String),

    /// The feed gave up after exhausting its reconnect budget.
    #[error("max reconnect attempts ({attempts}) exceeded")]
    ReconnectExhausted {
        /// Number of retries that were attempted.
        attempts: u32,
    },

    /// The feed was already started.
    #[error("Feed already started")]
    FeedAlreadyStarted,
}
