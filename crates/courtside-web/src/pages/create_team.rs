//! Create-team page

use std::fmt;

use courtside_client::Reply;
use courtside_types::{CreateTeamRequest, PlayerId};

use crate::messages::{classify, GENERIC_ERROR, MISSING_PLAYER, SAME_PLAYER, TEAM_CREATED};
use crate::pages::{fetch_all_players, no_reply, rejected, TeamsPage};
use crate::view::{Link, Outcome};
use crate::PageContext;

/// Team form fields, shared by the create and edit pages
///
/// Player fields hold the raw ids chosen from the dropdowns; empty means
/// nothing was chosen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamForm {
    /// First player id
    pub player_one: String,
    /// Second player id
    pub player_two: String,
    /// Optional team name
    pub name: String,
}

impl TeamForm {
    /// Check the player choices before anything is sent.
    pub(crate) fn players(&self) -> Result<(PlayerId, PlayerId), Outcome> {
        let one = self.player_one.trim();
        let two = self.player_two.trim();

        if one.is_empty() || two.is_empty() {
            return Err(Outcome::Error(classify(MISSING_PLAYER)));
        }
        if one == two {
            return Err(Outcome::Error(classify(SAME_PLAYER)));
        }

        match (PlayerId::parse(one), PlayerId::parse(two)) {
            (Ok(one), Ok(two)) => Ok((one, two)),
            _ => Err(Outcome::Error(GENERIC_ERROR)),
        }
    }
}

/// One dropdown entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerOption {
    /// "First Last"
    pub label: String,
    /// Value submitted when chosen
    pub value: PlayerId,
}

impl fmt::Display for PlayerOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.value)
    }
}

/// Dropdown entries for the signed-in user's players.
pub(crate) async fn player_options(ctx: &PageContext) -> Vec<PlayerOption> {
    fetch_all_players(ctx)
        .await
        .into_iter()
        .map(|player| PlayerOption {
            label: player.full_name(),
            value: player.id,
        })
        .collect()
}

/// Create-team page controller
#[derive(Debug, Clone, Copy)]
pub struct CreateTeamPage<'a> {
    ctx: &'a PageContext,
}

impl<'a> CreateTeamPage<'a> {
    /// Page path
    pub const PATH: &'static str = "/create-team";

    /// Bind the page to a context
    pub fn new(ctx: &'a PageContext) -> Self {
        Self { ctx }
    }

    /// Entries for both player dropdowns
    pub async fn player_options(&self) -> Vec<PlayerOption> {
        player_options(self.ctx).await
    }

    /// Create a team owned by the signed-in user.
    pub async fn submit(&self, form: &TeamForm) -> Outcome {
        let (player_one, player_two) = match form.players() {
            Ok(players) => players,
            Err(outcome) => return outcome,
        };

        let request = CreateTeamRequest {
            player_one,
            player_two,
            name: form.name.clone(),
            user_id: self.ctx.store().user_id(),
        };

        match self.ctx.api().create_team(&request).await {
            Ok(Reply::Success { .. }) => Outcome::Success {
                message: TEAM_CREATED,
                link: Link::view_all("Teams", TeamsPage::PATH),
            },
            Ok(Reply::Failure(failure)) => rejected(&failure),
            Err(e) => no_reply("create team", &e),
        }
    }
}
