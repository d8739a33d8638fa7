//! Edit-player page

use courtside_client::{Reply, SessionKey};
use courtside_types::{PlayerId, UpdatePlayerRequest};
use tracing::warn;

use crate::messages::{GENERIC_ERROR, PLAYER_UPDATED};
use crate::pages::{no_reply, path_segment, rejected, PlayerForm, PlayersPage};
use crate::view::{Link, Outcome};
use crate::PageContext;

/// Edit-player page controller
///
/// The player id comes from the page path (`/edit-player/:id`); the current
/// names come from the values the players list stored before navigating here.
#[derive(Debug, Clone, Copy)]
pub struct EditPlayerPage<'a> {
    ctx: &'a PageContext,
}

impl<'a> EditPlayerPage<'a> {
    /// Path prefix
    pub const PREFIX: &'static str = "/edit-player/";

    /// Bind the page to a context
    pub fn new(ctx: &'a PageContext) -> Self {
        Self { ctx }
    }

    /// Path of the edit page for `id`
    pub fn path_for(id: PlayerId) -> String {
        format!("{}{id}", Self::PREFIX)
    }

    /// Form values to start from
    pub fn prefill(&self) -> PlayerForm {
        let store = self.ctx.store();
        PlayerForm {
            first_name: store.get(SessionKey::PlayerFirstName).unwrap_or_default(),
            last_name: store.get(SessionKey::PlayerLastName).unwrap_or_default(),
        }
    }

    /// Save the player named in `path`.
    pub async fn submit(&self, path: &str, form: &PlayerForm) -> Outcome {
        let Some(id) = path_segment(path, 2).and_then(|s| PlayerId::parse(s).ok()) else {
            warn!(path, "No player id in path");
            return Outcome::Error(GENERIC_ERROR);
        };

        let request = UpdatePlayerRequest {
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
            id,
        };

        match self.ctx.api().update_player(&request).await {
            Ok(Reply::Success { .. }) => {
                let store = self.ctx.store();
                let saved = store
                    .set_scratch(SessionKey::PlayerFirstName, &form.first_name)
                    .and_then(|()| store.set_scratch(SessionKey::PlayerLastName, &form.last_name));
                if let Err(e) = saved {
                    warn!(error = %e, "Failed to remember updated player names");
                }

                Outcome::Success {
                    message: PLAYER_UPDATED,
                    link: Link::view_all("Players", PlayersPage::PATH),
                }
            }
            Ok(Reply::Failure(failure)) => rejected(&failure),
            Err(e) => no_reply("update player", &e),
        }
    }
}
