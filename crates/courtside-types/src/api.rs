//! API error bodies

use serde::{Deserialize, Serialize};

/// Error body returned by the API on any failure status
///
/// The `message` is the server's raw error text (often a database
/// constraint name or driver error) and is not meant to be shown as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    /// Raw server message
    #[serde(default)]
    pub message: String,
}

impl ApiMessage {
    /// Parse an error body, falling back to an empty message for
    /// anything that is not `{"message": "..."}`.
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }
}
