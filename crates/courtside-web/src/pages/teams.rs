//! Teams list page

use std::fmt;

use courtside_client::{Reply, SessionKey};
use courtside_types::{Player, PlayerId, Team, TeamId};
use tracing::warn;

use crate::messages::{
    classify, GENERIC_ERROR, NO_TEAMS, NO_TEAM_NAME, TEAMS_FETCH_FAILED, UNKNOWN_PLAYER,
};
use crate::pages::{fetch_all_players, DeleteOutcome, EditTeamPage};
use crate::view::{Link, Navigation, Outcome};
use crate::PageContext;

/// One row of the teams list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamEntry {
    /// The team
    pub team: Team,
    /// `Team Name: "..." Player One: "..." Player Two: "..."`
    pub label: String,
    /// Edit page for this team
    pub edit_href: String,
}

impl TeamEntry {
    fn new(team: Team, players: &[Player]) -> Self {
        let name = if team.name.is_empty() {
            NO_TEAM_NAME
        } else {
            team.name.as_str()
        };
        let label = format!(
            r#"Team Name: "{name}" Player One: "{}" Player Two: "{}""#,
            player_name(players, team.player_one),
            team.player_two
                .map_or_else(|| UNKNOWN_PLAYER.to_string(), |id| player_name(players, id)),
        );

        Self {
            edit_href: EditTeamPage::path_for(team.id),
            label,
            team,
        }
    }
}

fn player_name(players: &[Player], id: PlayerId) -> String {
    players
        .iter()
        .find(|player| player.id == id)
        .map_or_else(|| UNKNOWN_PLAYER.to_string(), Player::full_name)
}

/// Rendered teams list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamsView {
    /// "Create New Team" control
    pub create: Link,
    /// Two-player teams, in server order
    pub entries: Vec<TeamEntry>,
    /// Shown instead of entries when there are none or the fetch failed
    pub notice: Option<&'static str>,
}

impl fmt::Display for TeamsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.create)?;
        for entry in &self.entries {
            writeln!(f, "{}  [Edit] [x]  ({})", entry.label, entry.team.id)?;
        }
        if let Some(notice) = self.notice {
            writeln!(f, "{notice}")?;
        }
        Ok(())
    }
}

/// Teams list page controller
#[derive(Debug, Clone, Copy)]
pub struct TeamsPage<'a> {
    ctx: &'a PageContext,
}

impl<'a> TeamsPage<'a> {
    /// Page path
    pub const PATH: &'static str = "/teams";

    /// Bind the page to a context
    pub fn new(ctx: &'a PageContext) -> Self {
        Self { ctx }
    }

    /// Fetch and render the signed-in user's two-player teams.
    pub async fn load(&self) -> TeamsView {
        let create = Link::new("Create New Team", "/create-team");
        let user_id = self.ctx.store().user_id();

        let teams = match self.ctx.api().list_teams(user_id).await {
            Ok(Reply::Success { body, .. }) => body,
            Ok(Reply::Failure(_)) => return Self::failed(create),
            Err(e) => {
                warn!(error = %e, "Failed to fetch teams");
                return Self::failed(create);
            }
        };

        let doubles: Vec<Team> = teams.into_iter().filter(Team::is_doubles).collect();

        if doubles.is_empty() {
            return TeamsView {
                create,
                entries: Vec::new(),
                notice: Some(NO_TEAMS),
            };
        }

        let players = fetch_all_players(self.ctx).await;
        let entries = doubles
            .into_iter()
            .map(|team| TeamEntry::new(team, &players))
            .collect();

        TeamsView {
            create,
            entries,
            notice: None,
        }
    }

    fn failed(create: Link) -> TeamsView {
        TeamsView {
            create,
            entries: Vec::new(),
            notice: Some(TEAMS_FETCH_FAILED),
        }
    }

    /// Remember the team's players for the edit form and open it.
    pub fn edit(&self, team: &Team) -> Outcome {
        let Some(second) = team.player_two else {
            return Outcome::Error(GENERIC_ERROR);
        };

        let store = self.ctx.store();
        let saved = store
            .set_scratch(SessionKey::TeamPlayerOne, &team.player_one.to_string())
            .and_then(|()| store.set_scratch(SessionKey::TeamPlayerTwo, &second.to_string()));

        match saved {
            Ok(()) => Outcome::Navigate(Navigation::to(EditTeamPage::path_for(team.id))),
            Err(e) => {
                warn!(error = %e, "Failed to store team for editing");
                Outcome::Error(GENERIC_ERROR)
            }
        }
    }

    /// Delete a team and re-render the list.
    pub async fn delete(&self, id: TeamId) -> DeleteOutcome<TeamsView> {
        match self.ctx.api().delete_team(id).await {
            Ok(Reply::Success { .. }) => DeleteOutcome::Deleted(self.load().await),
            Ok(Reply::Failure(failure)) => DeleteOutcome::Failed(classify(&failure.message)),
            Err(e) => {
                warn!(error = %e, %id, "Failed to delete team");
                DeleteOutcome::Failed(GENERIC_ERROR)
            }
        }
    }
}
