//! Create-player page

use courtside_client::Reply;
use courtside_types::CreatePlayerRequest;

use crate::messages::PLAYER_CREATED;
use crate::pages::{no_reply, rejected, PlayersPage};
use crate::view::{Link, Outcome};
use crate::PageContext;

/// Player form fields, shared by the create and edit pages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerForm {
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
}

/// Create-player page controller
#[derive(Debug, Clone, Copy)]
pub struct CreatePlayerPage<'a> {
    ctx: &'a PageContext,
}

impl<'a> CreatePlayerPage<'a> {
    /// Page path
    pub const PATH: &'static str = "/create-player";

    /// Bind the page to a context
    pub fn new(ctx: &'a PageContext) -> Self {
        Self { ctx }
    }

    /// Create a player owned by the signed-in user.
    pub async fn submit(&self, form: &PlayerForm) -> Outcome {
        let request = CreatePlayerRequest {
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
            user_id: self.ctx.store().user_id(),
        };

        match self.ctx.api().create_player(&request).await {
            Ok(Reply::Success { .. }) => Outcome::Success {
                message: PLAYER_CREATED,
                link: Link::view_all("Players", PlayersPage::PATH),
            },
            Ok(Reply::Failure(failure)) => rejected(&failure),
            Err(e) => no_reply("create player", &e),
        }
    }
}
