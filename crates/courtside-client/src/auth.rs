//! Session refresh
//!
//! Every page load starts by asking the server whether the stored token is
//! still good. The answer is written back to the session store before any
//! page renders, so navigation and access decisions never rest on a stale
//! local token.

use std::sync::Arc;

use courtside_types::AuthPayload;
use tracing::{debug, info, instrument, warn};

use crate::api::{ApiClient, Reply};
use crate::session::{Session, SessionKey, SessionStore};
use crate::Result;

/// Whether the current page load runs with a validated session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStatus {
    /// The last refresh succeeded and its session was stored
    Authenticated {
        /// Signed-in user's name
        username: String,
    },
    /// No session; the store has been cleared
    Anonymous,
}

impl AuthStatus {
    /// True iff the last refresh succeeded
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    /// Signed-in user's name
    pub fn username(&self) -> Option<&str> {
        match self {
            Self::Authenticated { username } => Some(username),
            Self::Anonymous => None,
        }
    }
}

/// Owner of all writes to the session triple.
#[derive(Debug, Clone)]
pub struct AuthController {
    api: ApiClient,
}

impl AuthController {
    /// Create a controller writing to the client's session store
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// API client used for refreshes
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    fn store(&self) -> &Arc<dyn SessionStore> {
        self.api.store()
    }

    /// Validate the stored token with the server and record the outcome.
    ///
    /// The token is always sent, even when absent. A rejection, an
    /// unreachable server or an unreadable payload all leave the store empty.
    #[instrument(skip(self))]
    pub async fn check_session(&self) -> AuthStatus {
        let token = self.store().get(SessionKey::AccessToken);

        match self.api.refresh(token).await {
            Ok(Reply::Success { body, .. }) => match self.establish(&body) {
                Ok(status) => status,
                Err(e) => {
                    warn!(error = %e, "Failed to store refreshed session");
                    self.forget();
                    AuthStatus::Anonymous
                }
            },
            Ok(Reply::Failure(failure)) => {
                debug!(status = failure.status.as_u16(), "Session refresh rejected");
                self.forget();
                AuthStatus::Anonymous
            }
            Err(e) => {
                warn!(error = %e, "Session refresh failed");
                self.forget();
                AuthStatus::Anonymous
            }
        }
    }

    /// Store the session carried by a login, registration or refresh payload.
    pub fn establish(&self, payload: &AuthPayload) -> Result<AuthStatus> {
        let session = Session::from_payload(payload);
        self.store().set_all(&session)?;
        debug!(user_id = %session.user_id, "Session stored");
        Ok(AuthStatus::Authenticated {
            username: session.username,
        })
    }

    /// Drop the session and all scratch values.
    pub fn logout(&self) -> Result<()> {
        self.store().clear_all()?;
        info!("Logged out");
        Ok(())
    }

    fn forget(&self) {
        if let Err(e) = self.store().clear_all() {
            warn!(error = %e, "Failed to clear session store");
        }
    }
}
