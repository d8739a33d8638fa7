//! Configuration for the Courtside CLI.

use std::path::PathBuf;
use std::time::Duration;

use crate::cli::Cli;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the tennis records API
    pub api_url: String,

    /// File the session is kept in between invocations
    pub session_file: PathBuf,

    /// Whole-request timeout
    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url = std::env::var("COURTSIDE_API_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string());

        let session_file = std::env::var("COURTSIDE_SESSION_FILE")
            .unwrap_or_else(|_| ".courtside-session.json".to_string())
            .into();

        // Request timeout (default 30 seconds)
        let request_timeout_secs: u64 = std::env::var("COURTSIDE_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("COURTSIDE_REQUEST_TIMEOUT_SECS"))?;

        if request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "COURTSIDE_REQUEST_TIMEOUT_SECS must be greater than zero",
            ));
        }

        Ok(Self {
            api_url,
            session_file,
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }

    /// Apply command-line flags on top of the environment.
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(url) = &cli.api_url {
            self.api_url = url.clone();
        }
        if let Some(path) = &cli.session_file {
            self.session_file = path.clone();
        }
        self
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
