//! Client errors
//!
//! Error types for Courtside client operations. HTTP failure statuses are not
//! errors: they come back as [`Reply::Failure`](crate::Reply) so callers can
//! branch on them. `ClientError` covers everything that prevents a reply.

use thiserror::Error;

use crate::config::ConfigError;
use crate::session::SessionError;

/// Client errors for Courtside operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Connection error - failed to reach the server.
    #[error("connection error: {0}")]
    Connection(String),

    /// Request timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Request could not be built (e.g. a token that is not a valid header value).
    #[error("invalid request: {0}")]
    Request(String),

    /// Success status with a body that does not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Session store error.
    #[error("session store error: {0}")]
    Session(#[from] SessionError),
}

impl ClientError {
    /// Returns true for transport-level failures (server unreachable or slow).
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Timeout(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else if err.is_builder() {
            Self::Request(err.to_string())
        } else {
            Self::Connection(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
