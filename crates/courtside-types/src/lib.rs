//! Courtside Types - Shared domain types
//!
//! This crate contains the types exchanged with the tennis-records REST API:
//! - User identity and authentication payloads
//! - Players and teams
//! - API error bodies

pub mod api;
pub mod auth;
pub mod player;
pub mod team;
pub mod user;

pub use api::*;
pub use auth::*;
pub use player::*;
pub use team::*;
pub use user::*;
