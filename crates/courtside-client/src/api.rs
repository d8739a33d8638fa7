//! REST API client
//!
//! Thin wrapper over the tennis-records API. Every call returns a [`Reply`]:
//! the success variant carries the typed body, the failure variant carries the
//! status and the server's `message`. Nothing is retried.

use std::sync::Arc;

use courtside_types::{
    ApiMessage, AuthPayload, CreatePlayerRequest, CreateTeamRequest, LoginRequest, Player,
    PlayerId, RefreshRequest, RegisterRequest, Team, TeamId, UpdatePlayerRequest,
    UpdateTeamRequest, UserId,
};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::session::{SessionKey, SessionStore};
use crate::{ClientConfig, ClientError, Result};

pub use reqwest::StatusCode;

/// Statuses the refresh endpoint uses to reject a token.
const REFRESH_REJECTIONS: [StatusCode; 3] = [
    StatusCode::BAD_REQUEST,
    StatusCode::UNAUTHORIZED,
    StatusCode::INTERNAL_SERVER_ERROR,
];

/// Failure reply from the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    /// HTTP status
    pub status: StatusCode,
    /// Raw server message; empty when the body carried none
    pub message: String,
}

/// Outcome of an API call that reached the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply<T> {
    /// The endpoint's success status, with its decoded body
    Success {
        /// HTTP status
        status: StatusCode,
        /// Decoded body
        body: T,
    },
    /// Any other status
    Failure(ApiFailure),
}

impl<T> Reply<T> {
    /// HTTP status of the reply
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Success { status, .. } => *status,
            Self::Failure(failure) => failure.status,
        }
    }

    /// Whether this is the success variant
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Transform the success body
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Reply<U> {
        match self {
            Self::Success { status, body } => Reply::Success {
                status,
                body: f(body),
            },
            Self::Failure(failure) => Reply::Failure(failure),
        }
    }

    /// Success body or failure details
    pub fn into_result(self) -> std::result::Result<T, ApiFailure> {
        match self {
            Self::Success { body, .. } => Ok(body),
            Self::Failure(failure) => Err(failure),
        }
    }
}

/// Whether a call carries the stored bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
    Bearer,
    Anonymous,
}

/// Client for the tennis-records REST API.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    config: ClientConfig,
    store: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client that reads its bearer token from `store`.
    pub fn new(config: ClientConfig, store: Arc<dyn SessionStore>) -> Result<Self> {
        let http = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .user_agent(config.user_agent())
            .build()?;

        Ok(Self {
            http,
            config,
            store,
        })
    }

    /// Client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Session store the client reads tokens from
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Validate and renew `token`.
    ///
    /// 400, 401 and 500 are rejections; every other status is treated as
    /// success and must carry an [`AuthPayload`].
    #[instrument(skip(self, token), level = "debug")]
    pub async fn refresh(&self, token: Option<String>) -> Result<Reply<AuthPayload>> {
        let body = RefreshRequest {
            access_token: token,
        };
        let (status, bytes) = self
            .send(Method::POST, "/api/refresh", Some(&body), Auth::Anonymous)
            .await?;

        if REFRESH_REJECTIONS.contains(&status) {
            Ok(failure(status, &bytes))
        } else {
            Ok(Reply::Success {
                status,
                body: serde_json::from_slice(&bytes)?,
            })
        }
    }

    /// Log in with a username or email address.
    #[instrument(skip(self, password), level = "debug")]
    pub async fn login(&self, username_or_email: &str, password: &str) -> Result<Reply<AuthPayload>> {
        let body = LoginRequest {
            username_or_email: username_or_email.to_string(),
            password: password.to_string(),
        };
        self.call(Method::POST, "/api/login", Some(&body), Auth::Anonymous, StatusCode::OK)
            .await
    }

    /// Create an account.
    #[instrument(skip(self, password, confirm), level = "debug")]
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        confirm: &str,
    ) -> Result<Reply<AuthPayload>> {
        let body = RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            confirm: confirm.to_string(),
        };
        self.call(
            Method::POST,
            "/api/register",
            Some(&body),
            Auth::Anonymous,
            StatusCode::CREATED,
        )
        .await
    }

    // =========================================================================
    // Players
    // =========================================================================

    /// All players of a user. A `null` body is an empty list.
    #[instrument(skip(self), level = "debug")]
    pub async fn list_players(&self, user_id: Option<UserId>) -> Result<Reply<Vec<Player>>> {
        let path = format!("/api/players/{}", path_id(user_id));
        let reply: Reply<Option<Vec<Player>>> = self
            .call::<(), _>(Method::GET, &path, None, Auth::Bearer, StatusCode::OK)
            .await?;
        Ok(reply.map(Option::unwrap_or_default))
    }

    /// Create a player. Only the status matters; the body is not read.
    #[instrument(skip(self), level = "debug")]
    pub async fn create_player(&self, fields: &CreatePlayerRequest) -> Result<Reply<()>> {
        self.call_ignoring_body(Method::POST, "/api/players", Some(fields), StatusCode::CREATED)
            .await
    }

    /// Rename a player.
    #[instrument(skip(self), level = "debug")]
    pub async fn update_player(&self, fields: &UpdatePlayerRequest) -> Result<Reply<()>> {
        self.call_ignoring_body(Method::PUT, "/api/players", Some(fields), StatusCode::OK)
            .await
    }

    /// Delete a player.
    #[instrument(skip(self), level = "debug")]
    pub async fn delete_player(&self, id: PlayerId) -> Result<Reply<()>> {
        let path = format!("/api/players/{id}");
        self.call_ignoring_body::<()>(Method::DELETE, &path, None, StatusCode::OK)
            .await
    }

    // =========================================================================
    // Teams
    // =========================================================================

    /// All teams of a user, singles placeholders included. A `null` body is
    /// an empty list.
    #[instrument(skip(self), level = "debug")]
    pub async fn list_teams(&self, user_id: Option<UserId>) -> Result<Reply<Vec<Team>>> {
        let path = format!("/api/teams/{}", path_id(user_id));
        let reply: Reply<Option<Vec<Team>>> = self
            .call::<(), _>(Method::GET, &path, None, Auth::Bearer, StatusCode::OK)
            .await?;
        Ok(reply.map(Option::unwrap_or_default))
    }

    /// Create a two-player team. Only the status matters; the body is not
    /// read.
    #[instrument(skip(self), level = "debug")]
    pub async fn create_team(&self, fields: &CreateTeamRequest) -> Result<Reply<()>> {
        self.call_ignoring_body(Method::POST, "/api/teams", Some(fields), StatusCode::CREATED)
            .await
    }

    /// Change a team's name or players.
    #[instrument(skip(self), level = "debug")]
    pub async fn update_team(&self, fields: &UpdateTeamRequest) -> Result<Reply<()>> {
        self.call_ignoring_body(Method::PUT, "/api/teams", Some(fields), StatusCode::OK)
            .await
    }

    /// Delete a team.
    #[instrument(skip(self), level = "debug")]
    pub async fn delete_team(&self, id: TeamId) -> Result<Reply<()>> {
        let path = format!("/api/teams/{id}");
        self.call_ignoring_body::<()>(Method::DELETE, &path, None, StatusCode::OK)
            .await
    }

    // =========================================================================
    // Plumbing
    // =========================================================================

    async fn call<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        auth: Auth,
        success: StatusCode,
    ) -> Result<Reply<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let (status, bytes) = self.send(method, path, body, auth).await?;
        if status == success {
            Ok(Reply::Success {
                status,
                body: serde_json::from_slice(&bytes)?,
            })
        } else {
            Ok(failure(status, &bytes))
        }
    }

    async fn call_ignoring_body<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        success: StatusCode,
    ) -> Result<Reply<()>>
    where
        B: Serialize + ?Sized,
    {
        let (status, bytes) = self.send(method, path, body, Auth::Bearer).await?;
        if status == success {
            Ok(Reply::Success { status, body: () })
        } else {
            Ok(failure(status, &bytes))
        }
    }

    async fn send<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        auth: Auth,
    ) -> Result<(StatusCode, Vec<u8>)>
    where
        B: Serialize + ?Sized,
    {
        let url = self.config.url(path);
        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json");

        if auth == Auth::Bearer {
            let token = self.store.get(SessionKey::AccessToken).unwrap_or_default();
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        if let Some(body) = body {
            request = request.body(serde_json::to_vec(body)?);
        }

        let response = request.send().await.map_err(|e| {
            warn!(error = %e, %method, path, "API request failed");
            ClientError::from(e)
        })?;

        let status = response.status();
        let bytes = response.bytes().await?.to_vec();
        debug!(%method, path, status = status.as_u16(), "API response");

        Ok((status, bytes))
    }
}

fn failure<T>(status: StatusCode, body: &[u8]) -> Reply<T> {
    let ApiMessage { message } = ApiMessage::from_body(body);
    debug!(status = status.as_u16(), message = %message, "API rejected request");
    Reply::Failure(ApiFailure { status, message })
}

fn path_id(user_id: Option<UserId>) -> String {
    user_id.map(|id| id.to_string()).unwrap_or_default()
}
