//! View models shared by the page controllers

use std::fmt;

use crate::navbar::Navbar;

/// Root path; the landing page.
pub const ROOT: &str = "/";

/// Whether `path` is the landing page
pub fn is_root(path: &str) -> bool {
    path.is_empty() || path == ROOT
}

/// A request to leave the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation(pub String);

impl Navigation {
    /// Navigate to `path`
    pub fn to(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Target path
    pub fn path(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "-> {}", self.0)
    }
}

/// A labelled control that navigates when activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Button text
    pub label: String,
    /// Target path
    pub href: String,
}

impl Link {
    /// Create a link
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
        }
    }

    /// The "View all ..." control shown after a successful save
    pub fn view_all(resource: &str, href: &str) -> Self {
        Self::new(format!("View all {resource}"), href)
    }

    /// Navigation performed on activation
    pub fn activate(&self) -> Navigation {
        Navigation::to(self.href.clone())
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] ({})", self.label, self.href)
    }
}

/// Result of submitting a form or pressing an action button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Leave the page
    Navigate(Navigation),
    /// Inline success message with a follow-up link
    Success {
        /// Message text
        message: &'static str,
        /// Follow-up control
        link: Link,
    },
    /// Inline error message
    Error(&'static str),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Navigate(nav) => write!(f, "{nav}"),
            Self::Success { message, link } => write!(f, "{message}\n{link}"),
            Self::Error(message) => write!(f, "error: {message}"),
        }
    }
}

/// A page: the navbar every page carries, plus its own fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<V> {
    /// Rendered navbar
    pub navbar: Navbar,
    /// Page-specific fragment
    pub body: V,
}

impl<V: fmt::Display> fmt::Display for Page<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.navbar)?;
        write!(f, "{}", self.body)
    }
}
