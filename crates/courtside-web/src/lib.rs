//! Courtside Web - pages of the tennis records app
//!
//! Page controllers turn user actions into API calls and return view models;
//! the binding layer decides how to show them. Every page load starts with
//! [`PageContext::enter`], which refreshes the session and renders the navbar.

pub mod context;
pub mod messages;
pub mod navbar;
pub mod pages;
pub mod view;

pub use context::{Frame, PageContext};
pub use messages::classify;
pub use navbar::{NavItem, Navbar};
pub use view::{Link, Navigation, Outcome, Page};
