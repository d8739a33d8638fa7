//! Registration page

use tracing::{info, warn};

use courtside_client::Reply;

use crate::messages::{classify, GENERIC_ERROR, PASSWORD_MISMATCH};
use crate::pages::{no_reply, rejected};
use crate::view::{Navigation, Outcome, ROOT};
use crate::PageContext;

/// Registration form fields
#[derive(Clone, Default)]
pub struct RegisterForm {
    /// Desired username
    pub username: String,
    /// Email address
    pub email: String,
    /// Password
    pub password: String,
    /// Password again
    pub confirm: String,
}

impl std::fmt::Debug for RegisterForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterForm")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Registration page controller
#[derive(Debug, Clone, Copy)]
pub struct RegisterPage<'a> {
    ctx: &'a PageContext,
}

impl<'a> RegisterPage<'a> {
    /// Page path
    pub const PATH: &'static str = "/register";

    /// Bind the page to a context
    pub fn new(ctx: &'a PageContext) -> Self {
        Self { ctx }
    }

    /// Create the account; on success store the session and go to the
    /// landing page. A confirmation mismatch never reaches the server.
    pub async fn submit(&self, form: &RegisterForm) -> Outcome {
        if form.password != form.confirm {
            return Outcome::Error(classify(PASSWORD_MISMATCH));
        }

        let reply = self
            .ctx
            .api()
            .register(&form.username, &form.email, &form.password, &form.confirm)
            .await;

        match reply {
            Ok(Reply::Success { body, .. }) => match self.ctx.auth().establish(&body) {
                Ok(_) => {
                    info!(username = %body.user.username, "Registered");
                    Outcome::Navigate(Navigation::to(ROOT))
                }
                Err(e) => {
                    warn!(error = %e, "Failed to store session after registration");
                    Outcome::Error(GENERIC_ERROR)
                }
            },
            Ok(Reply::Failure(failure)) => rejected(&failure),
            Err(e) => no_reply("register", &e),
        }
    }
}
