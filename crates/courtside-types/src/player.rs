//! Player types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::UserId;

/// Unique player identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    /// Parse a player ID from a string
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for PlayerId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// A player record owned by a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Player ID
    #[serde(rename = "ID")]
    pub id: PlayerId,
    /// First name
    #[serde(rename = "FirstName")]
    pub first_name: String,
    /// Last name
    #[serde(rename = "LastName")]
    pub last_name: String,
    /// Owning user
    #[serde(rename = "UserID", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

impl Player {
    /// "First Last", as shown in lists and dropdowns
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Body of `POST /api/players`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlayerRequest {
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Owning user, taken from the session
    pub user_id: Option<UserId>,
}

/// Body of `PUT /api/players`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePlayerRequest {
    /// First name
    #[serde(rename = "FirstName")]
    pub first_name: String,
    /// Last name
    #[serde(rename = "LastName")]
    pub last_name: String,
    /// Player being edited
    #[serde(rename = "ID")]
    pub id: PlayerId,
}
