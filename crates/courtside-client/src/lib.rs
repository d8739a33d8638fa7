//! Courtside Client - session and API access for the tennis records app
//!
//! - [`session`]: persisted token, user and edit-form scratch values
//! - [`api`]: typed calls to the REST API
//! - [`auth`]: the once-per-page session refresh

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod session;

pub use api::{ApiClient, ApiFailure, Reply, StatusCode};
pub use auth::{AuthController, AuthStatus};
pub use config::{ClientConfig, ClientConfigBuilder, ConfigError};
pub use error::ClientError;
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionError, SessionKey, SessionStore};

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
