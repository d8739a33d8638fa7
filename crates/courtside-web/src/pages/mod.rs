//! Page controllers, one per page

pub mod create_player;
pub mod create_team;
pub mod edit_player;
pub mod edit_team;
pub mod login;
pub mod players;
pub mod register;
pub mod teams;

pub use create_player::{CreatePlayerPage, PlayerForm};
pub use create_team::{CreateTeamPage, PlayerOption, TeamForm};
pub use edit_player::EditPlayerPage;
pub use edit_team::EditTeamPage;
pub use login::{LoginForm, LoginPage};
pub use players::{PlayerEntry, PlayersPage, PlayersView};
pub use register::{RegisterForm, RegisterPage};
pub use teams::{TeamEntry, TeamsPage, TeamsView};

use std::fmt;

use courtside_client::{ApiFailure, ClientError, Reply};
use courtside_types::Player;
use tracing::warn;

use crate::messages::{classify, GENERIC_ERROR};
use crate::view::Outcome;
use crate::PageContext;

/// Result of deleting an entry from a list page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome<V> {
    /// Deleted; the list re-rendered
    Deleted(V),
    /// Not deleted
    Failed(&'static str),
}

impl<V: fmt::Display> fmt::Display for DeleteOutcome<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deleted(view) => write!(f, "{view}"),
            Self::Failed(message) => write!(f, "error: {message}"),
        }
    }
}

/// Inline message for a failure reply.
pub(crate) fn rejected(failure: &ApiFailure) -> Outcome {
    Outcome::Error(classify(&failure.message))
}

/// Inline message for a request that got no reply.
pub(crate) fn no_reply(action: &str, err: &ClientError) -> Outcome {
    warn!(error = %err, action, "Request failed");
    Outcome::Error(GENERIC_ERROR)
}

/// Segment `index` of a `/`-separated path, counting the empty segment
/// before the leading slash.
pub(crate) fn path_segment(path: &str, index: usize) -> Option<&str> {
    path.split('/').nth(index).filter(|s| !s.is_empty())
}

/// The signed-in user's players; empty on any failure.
pub(crate) async fn fetch_all_players(ctx: &PageContext) -> Vec<Player> {
    match ctx.api().list_players(ctx.store().user_id()).await {
        Ok(Reply::Success { body, .. }) => body,
        Ok(Reply::Failure(_)) => Vec::new(),
        Err(e) => {
            warn!(error = %e, "Failed to fetch players");
            Vec::new()
        }
    }
}
