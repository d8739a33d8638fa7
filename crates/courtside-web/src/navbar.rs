//! Navbar
//!
//! The navbar is rendered from the outcome of the page-load session refresh
//! and the current path alone, so it can be checked without any I/O. The
//! landing page carries its own sign-in and sign-up entry points, so the
//! anonymous navbar is empty there, and the authenticated one drops its Home
//! link.

use std::fmt;

use courtside_client::{AuthController, AuthStatus};
use tracing::warn;

use crate::view::{is_root, Navigation, ROOT};

/// One navbar control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavItem {
    /// Link to the landing page
    Home,
    /// Signed-in user's name, not interactive
    Username(String),
    /// Sign out and return to the landing page
    Logout,
    /// Link to the login page
    Login,
    /// Link to the registration page
    Register,
}

impl NavItem {
    /// Visible text
    pub fn label(&self) -> &str {
        match self {
            Self::Home => "Home",
            Self::Username(name) => name,
            Self::Logout => "Logout",
            Self::Login => "Login",
            Self::Register => "Register",
        }
    }

    /// Path a link navigates to
    pub fn href(&self) -> Option<&'static str> {
        match self {
            Self::Home | Self::Logout => Some(ROOT),
            Self::Login => Some("/login"),
            Self::Register => Some("/register"),
            Self::Username(_) => None,
        }
    }
}

/// Rendered navbar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navbar {
    items: Vec<NavItem>,
}

impl Navbar {
    /// Controls, left to right
    pub fn items(&self) -> &[NavItem] {
        &self.items
    }

    /// Whether the navbar shows nothing
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether `item` is shown
    pub fn contains(&self, item: &NavItem) -> bool {
        self.items.contains(item)
    }
}

impl fmt::Display for Navbar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = self
            .items
            .iter()
            .map(|item| match item {
                NavItem::Username(name) => name.clone(),
                other => format!("[{}]", other.label()),
            })
            .collect();
        write!(f, "{}", labels.join(" "))
    }
}

/// Render the navbar for `status` on `current_path`.
pub fn render(status: &AuthStatus, current_path: &str) -> Navbar {
    let on_root = is_root(current_path);
    let mut items = Vec::new();

    match status {
        AuthStatus::Authenticated { username } => {
            if !on_root {
                items.push(NavItem::Home);
            }
            items.push(NavItem::Username(username.clone()));
            items.push(NavItem::Logout);
        }
        AuthStatus::Anonymous => {
            if !on_root {
                items.push(NavItem::Login);
                items.push(NavItem::Register);
            }
        }
    }

    Navbar { items }
}

/// Refresh the session, then render the navbar for it.
pub async fn load_navbar(auth: &AuthController, current_path: &str) -> (AuthStatus, Navbar) {
    let status = auth.check_session().await;
    let navbar = render(&status, current_path);
    (status, navbar)
}

/// Activate a navbar control.
///
/// Logout clears the session store before navigating; the username label
/// does nothing.
pub fn activate(item: &NavItem, auth: &AuthController) -> Option<Navigation> {
    if *item == NavItem::Logout {
        if let Err(e) = auth.logout() {
            warn!(error = %e, "Failed to clear session on logout");
        }
    }
    item.href().map(Navigation::to)
}
