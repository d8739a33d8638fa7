//! Shared page context

use std::sync::Arc;

use courtside_client::{ApiClient, AuthController, AuthStatus, SessionStore};

use crate::navbar::{load_navbar, Navbar};
use crate::view::Page;

/// Everything a page controller needs: the API client, the session store
/// behind it, and the controller owning session writes.
#[derive(Debug, Clone)]
pub struct PageContext {
    auth: AuthController,
}

/// The part of a page every load produces before page-specific work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Path being loaded
    pub path: String,
    /// Outcome of the page-load session refresh
    pub status: AuthStatus,
    /// Navbar rendered for it
    pub navbar: Navbar,
}

impl Frame {
    /// Attach the page fragment
    pub fn with_body<V>(self, body: V) -> Page<V> {
        Page {
            navbar: self.navbar,
            body,
        }
    }
}

impl PageContext {
    /// Create a context around `api`
    pub fn new(api: ApiClient) -> Self {
        Self {
            auth: AuthController::new(api),
        }
    }

    /// API client
    pub fn api(&self) -> &ApiClient {
        self.auth.api()
    }

    /// Session controller
    pub fn auth(&self) -> &AuthController {
        &self.auth
    }

    /// Session store
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        self.auth.api().store()
    }

    /// Start a page load: refresh the session and render the navbar.
    pub async fn enter(&self, path: &str) -> Frame {
        let (status, navbar) = load_navbar(&self.auth, path).await;
        Frame {
            path: path.to_string(),
            status,
            navbar,
        }
    }
}
