//! Edit-team page

use courtside_client::{Reply, SessionKey};
use courtside_types::{TeamId, UpdateTeamRequest};
use tracing::warn;

use crate::messages::{GENERIC_ERROR, TEAM_UPDATED};
use crate::pages::create_team::player_options;
use crate::pages::{no_reply, path_segment, rejected, PlayerOption, TeamForm, TeamsPage};
use crate::view::{Link, Outcome};
use crate::PageContext;

/// Edit-team page controller
///
/// The team id comes from the page path (`/edit-team/:id`); the current
/// players come from the ids the teams list stored before navigating here.
#[derive(Debug, Clone, Copy)]
pub struct EditTeamPage<'a> {
    ctx: &'a PageContext,
}

impl<'a> EditTeamPage<'a> {
    /// Path prefix
    pub const PREFIX: &'static str = "/edit-team/";

    /// Bind the page to a context
    pub fn new(ctx: &'a PageContext) -> Self {
        Self { ctx }
    }

    /// Path of the edit page for `id`
    pub fn path_for(id: TeamId) -> String {
        format!("{}{id}", Self::PREFIX)
    }

    /// Form values to start from. The name is not remembered and starts empty.
    pub fn prefill(&self) -> TeamForm {
        let store = self.ctx.store();
        TeamForm {
            player_one: store.get(SessionKey::TeamPlayerOne).unwrap_or_default(),
            player_two: store.get(SessionKey::TeamPlayerTwo).unwrap_or_default(),
            name: String::new(),
        }
    }

    /// Entries for both player dropdowns
    pub async fn player_options(&self) -> Vec<PlayerOption> {
        player_options(self.ctx).await
    }

    /// Save the team named in `path`.
    pub async fn submit(&self, path: &str, form: &TeamForm) -> Outcome {
        let (player_one, player_two) = match form.players() {
            Ok(players) => players,
            Err(outcome) => return outcome,
        };
        let Some(id) = path_segment(path, 2).and_then(|s| TeamId::parse(s).ok()) else {
            warn!(path, "No team id in path");
            return Outcome::Error(GENERIC_ERROR);
        };

        let request = UpdateTeamRequest {
            id,
            name: form.name.clone(),
            player_one,
            player_two,
        };

        match self.ctx.api().update_team(&request).await {
            Ok(Reply::Success { .. }) => {
                let store = self.ctx.store();
                let saved = store
                    .set_scratch(SessionKey::TeamPlayerOne, &player_one.to_string())
                    .and_then(|()| {
                        store.set_scratch(SessionKey::TeamPlayerTwo, &player_two.to_string())
                    });
                if let Err(e) = saved {
                    warn!(error = %e, "Failed to remember updated team players");
                }

                Outcome::Success {
                    message: TEAM_UPDATED,
                    link: Link::view_all("Teams", TeamsPage::PATH),
                }
            }
            Ok(Reply::Failure(failure)) => rejected(&failure),
            Err(e) => no_reply("update team", &e),
        }
    }
}
