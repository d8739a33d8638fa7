//! Team types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{PlayerId, UserId};

/// Unique team identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub Uuid);

impl TeamId {
    /// Parse a team ID from a string
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for TeamId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// A doubles team
///
/// The server also keeps one-player teams for singles; those have no
/// second player and are not shown as teams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Team ID
    #[serde(rename = "ID")]
    pub id: TeamId,
    /// Team name, empty when unnamed
    #[serde(rename = "Name", default)]
    pub name: String,
    /// First player
    #[serde(rename = "PlayerOne")]
    pub player_one: PlayerId,
    /// Second player
    #[serde(rename = "PlayerTwo", default)]
    pub player_two: Option<PlayerId>,
    /// Owning user
    #[serde(rename = "UserID", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

impl Team {
    /// Whether this is a two-player team
    pub fn is_doubles(&self) -> bool {
        self.player_two.is_some()
    }
}

/// Body of `POST /api/teams`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTeamRequest {
    /// First player
    #[serde(rename = "PlayerOne")]
    pub player_one: PlayerId,
    /// Second player
    #[serde(rename = "PlayerTwo")]
    pub player_two: PlayerId,
    /// Team name, may be empty
    #[serde(rename = "Name")]
    pub name: String,
    /// Owning user, taken from the session
    #[serde(rename = "UserID")]
    pub user_id: Option<UserId>,
}

/// Body of `PUT /api/teams`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTeamRequest {
    /// Team being edited
    #[serde(rename = "ID")]
    pub id: TeamId,
    /// Team name, may be empty
    #[serde(rename = "Name")]
    pub name: String,
    /// First player
    #[serde(rename = "PlayerOne")]
    pub player_one: PlayerId,
    /// Second player
    #[serde(rename = "PlayerTwo")]
    pub player_two: PlayerId,
}
