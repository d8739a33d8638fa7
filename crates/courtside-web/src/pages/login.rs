//! Login page

use tracing::{info, warn};

use courtside_client::Reply;

use crate::messages::GENERIC_ERROR;
use crate::pages::{no_reply, rejected};
use crate::view::{Navigation, Outcome, ROOT};
use crate::PageContext;

/// Login form fields
#[derive(Clone, Default)]
pub struct LoginForm {
    /// Username or email address
    pub username: String,
    /// Password
    pub password: String,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Login page controller
#[derive(Debug, Clone, Copy)]
pub struct LoginPage<'a> {
    ctx: &'a PageContext,
}

impl<'a> LoginPage<'a> {
    /// Page path
    pub const PATH: &'static str = "/login";

    /// Bind the page to a context
    pub fn new(ctx: &'a PageContext) -> Self {
        Self { ctx }
    }

    /// Log in; on success store the session and go to the landing page.
    pub async fn submit(&self, form: &LoginForm) -> Outcome {
        let reply = self
            .ctx
            .api()
            .login(&form.username, &form.password)
            .await;

        match reply {
            Ok(Reply::Success { body, .. }) => match self.ctx.auth().establish(&body) {
                Ok(_) => {
                    info!(username = %body.user.username, "Logged in");
                    Outcome::Navigate(Navigation::to(ROOT))
                }
                Err(e) => {
                    warn!(error = %e, "Failed to store session after login");
                    Outcome::Error(GENERIC_ERROR)
                }
            },
            Ok(Reply::Failure(failure)) => rejected(&failure),
            Err(e) => no_reply("login", &e),
        }
    }
}
