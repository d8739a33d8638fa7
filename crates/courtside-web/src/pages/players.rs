//! Players list page

use std::fmt;

use courtside_client::{Reply, SessionKey};
use courtside_types::{Player, PlayerId};
use tracing::warn;

use crate::messages::{classify, GENERIC_ERROR, NO_PLAYERS, PLAYERS_FETCH_FAILED};
use crate::pages::{DeleteOutcome, EditPlayerPage};
use crate::view::{Link, Navigation, Outcome};
use crate::PageContext;

/// One row of the players list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerEntry {
    /// The player
    pub player: Player,
    /// "First Last"
    pub label: String,
    /// Edit page for this player
    pub edit_href: String,
}

impl PlayerEntry {
    fn new(player: Player) -> Self {
        Self {
            label: player.full_name(),
            edit_href: EditPlayerPage::path_for(player.id),
            player,
        }
    }
}

/// Rendered players list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayersView {
    /// "Create New Player" control
    pub create: Link,
    /// Players, in server order
    pub entries: Vec<PlayerEntry>,
    /// Shown instead of entries when there are none or the fetch failed
    pub notice: Option<&'static str>,
}

impl fmt::Display for PlayersView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.create)?;
        for entry in &self.entries {
            writeln!(f, "{}  [Edit] [x]  ({})", entry.label, entry.player.id)?;
        }
        if let Some(notice) = self.notice {
            writeln!(f, "{notice}")?;
        }
        Ok(())
    }
}

/// Players list page controller
#[derive(Debug, Clone, Copy)]
pub struct PlayersPage<'a> {
    ctx: &'a PageContext,
}

impl<'a> PlayersPage<'a> {
    /// Page path
    pub const PATH: &'static str = "/players";

    /// Bind the page to a context
    pub fn new(ctx: &'a PageContext) -> Self {
        Self { ctx }
    }

    /// Fetch and render the signed-in user's players.
    pub async fn load(&self) -> PlayersView {
        let create = Link::new("Create New Player", "/create-player");
        let user_id = self.ctx.store().user_id();

        let (entries, notice) = match self.ctx.api().list_players(user_id).await {
            Ok(Reply::Success { body, .. }) if body.is_empty() => (Vec::new(), Some(NO_PLAYERS)),
            Ok(Reply::Success { body, .. }) => {
                (body.into_iter().map(PlayerEntry::new).collect(), None)
            }
            Ok(Reply::Failure(_)) => (Vec::new(), Some(PLAYERS_FETCH_FAILED)),
            Err(e) => {
                warn!(error = %e, "Failed to fetch players");
                (Vec::new(), Some(PLAYERS_FETCH_FAILED))
            }
        };

        PlayersView {
            create,
            entries,
            notice,
        }
    }

    /// Remember the player's names for the edit form and open it.
    pub fn edit(&self, player: &Player) -> Outcome {
        let store = self.ctx.store();
        let saved = store
            .set_scratch(SessionKey::PlayerFirstName, &player.first_name)
            .and_then(|()| store.set_scratch(SessionKey::PlayerLastName, &player.last_name));

        match saved {
            Ok(()) => Outcome::Navigate(Navigation::to(EditPlayerPage::path_for(player.id))),
            Err(e) => {
                warn!(error = %e, "Failed to store player for editing");
                Outcome::Error(GENERIC_ERROR)
            }
        }
    }

    /// Delete a player and re-render the list.
    pub async fn delete(&self, id: PlayerId) -> DeleteOutcome<PlayersView> {
        match self.ctx.api().delete_player(id).await {
            Ok(Reply::Success { .. }) => DeleteOutcome::Deleted(self.load().await),
            Ok(Reply::Failure(failure)) => DeleteOutcome::Failed(classify(&failure.message)),
            Err(e) => {
                warn!(error = %e, %id, "Failed to delete player");
                DeleteOutcome::Failed(GENERIC_ERROR)
            }
        }
    }
}
