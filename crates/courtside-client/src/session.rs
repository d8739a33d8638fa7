//! Session store
//!
//! Persisted key/value state holding the access token, the signed-in user and
//! the scratch values the edit pages prefill from. The token, user id and
//! username are only ever written together through [`SessionStore::set_all`]
//! and removed together through [`SessionStore::clear_all`], so a reader never
//! sees a token without its user or the other way round.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use courtside_types::{AuthPayload, UserId};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

/// Well-known keys of the persisted state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKey {
    /// Bearer token
    AccessToken,
    /// Signed-in user's id
    UserId,
    /// Signed-in user's name
    Username,
    /// First name prefilled on the edit-player page
    PlayerFirstName,
    /// Last name prefilled on the edit-player page
    PlayerLastName,
    /// First player id prefilled on the edit-team page
    TeamPlayerOne,
    /// Second player id prefilled on the edit-team page
    TeamPlayerTwo,
}

impl SessionKey {
    /// Keys written by `set_all`
    pub const SESSION: [SessionKey; 3] = [Self::AccessToken, Self::UserId, Self::Username];

    /// Every key the store knows about
    pub const ALL: [SessionKey; 7] = [
        Self::AccessToken,
        Self::UserId,
        Self::Username,
        Self::PlayerFirstName,
        Self::PlayerLastName,
        Self::TeamPlayerOne,
        Self::TeamPlayerTwo,
    ];

    /// Storage key
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AccessToken => "access-token",
            Self::UserId => "userId",
            Self::Username => "username",
            Self::PlayerFirstName => "player-first-name",
            Self::PlayerLastName => "player-last-name",
            Self::TeamPlayerOne => "team-player-one",
            Self::TeamPlayerTwo => "team-player-two",
        }
    }

    /// Whether page controllers may write this key directly
    pub fn is_scratch(self) -> bool {
        !Self::SESSION.contains(&self)
    }
}

impl std::fmt::Display for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The signed-in user's credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    /// Bearer token
    pub access_token: String,
    /// User id
    pub user_id: UserId,
    /// Username
    pub username: String,
}

impl Session {
    /// Build a session from a login, registration or refresh payload
    pub fn from_payload(payload: &AuthPayload) -> Self {
        Self {
            access_token: payload.access_token.clone(),
            user_id: payload.user.id,
            username: payload.user.username.clone(),
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"[REDACTED]")
            .field("user_id", &self.user_id)
            .field("username", &self.username)
            .finish()
    }
}

/// Session store errors
#[derive(Error, Debug)]
pub enum SessionError {
    /// Reading or writing the backing file failed
    #[error("session file {path}: {source}")]
    Io {
        /// Backing file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The backing file is not a JSON object of strings
    #[error("session file {path} is corrupt: {message}")]
    Corrupt {
        /// Backing file
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// Attempt to write a session key outside of `set_all`
    #[error("{0} can only be written together with the rest of the session")]
    NotScratch(&'static str),
}

/// Persisted client state.
///
/// Implementations must make `set_all` and `clear_all` atomic with respect
/// to concurrent readers.
pub trait SessionStore: Send + Sync {
    /// Current value of `key`. Empty values read as absent.
    fn get(&self, key: SessionKey) -> Option<String>;

    /// Store token, user id and username as one unit.
    fn set_all(&self, session: &Session) -> Result<(), SessionError>;

    /// Remove the session and every scratch value. Idempotent.
    fn clear_all(&self) -> Result<(), SessionError>;

    /// Write a scratch value.
    fn set_scratch(&self, key: SessionKey, value: &str) -> Result<(), SessionError>;

    /// The complete session, if one is stored.
    fn session(&self) -> Option<Session> {
        let access_token = self.get(SessionKey::AccessToken)?;
        let user_id = UserId::parse(&self.get(SessionKey::UserId)?).ok()?;
        let username = self.get(SessionKey::Username)?;
        Some(Session {
            access_token,
            user_id,
            username,
        })
    }

    /// Stored user id, if it parses.
    fn user_id(&self) -> Option<UserId> {
        self.get(SessionKey::UserId)
            .and_then(|id| UserId::parse(&id).ok())
    }
}

type Entries = BTreeMap<String, String>;

fn read_entry(entries: &Entries, key: SessionKey) -> Option<String> {
    entries
        .get(key.as_str())
        .filter(|value| !value.is_empty())
        .cloned()
}

fn with_session(entries: &Entries, session: &Session) -> Entries {
    let mut next = entries.clone();
    next.insert(
        SessionKey::AccessToken.as_str().to_string(),
        session.access_token.clone(),
    );
    next.insert(
        SessionKey::UserId.as_str().to_string(),
        session.user_id.to_string(),
    );
    next.insert(
        SessionKey::Username.as_str().to_string(),
        session.username.clone(),
    );
    next
}

fn without_known_keys(entries: &Entries) -> Entries {
    let mut next = entries.clone();
    for key in SessionKey::ALL {
        next.remove(key.as_str());
    }
    next
}

fn check_scratch(key: SessionKey) -> Result<(), SessionError> {
    if key.is_scratch() {
        Ok(())
    } else {
        Err(SessionError::NotScratch(key.as_str()))
    }
}

// =============================================================================
// In-memory store
// =============================================================================

/// Store that lives for the duration of the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: RwLock<Entries>,
}

impl MemorySessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: SessionKey) -> Option<String> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        read_entry(&entries, key)
    }

    fn set_all(&self, session: &Session) -> Result<(), SessionError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        *entries = with_session(&entries, session);
        Ok(())
    }

    fn clear_all(&self) -> Result<(), SessionError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        *entries = without_known_keys(&entries);
        Ok(())
    }

    fn set_scratch(&self, key: SessionKey, value: &str) -> Result<(), SessionError> {
        check_scratch(key)?;
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.as_str().to_string(), value.to_string());
        Ok(())
    }
}

// =============================================================================
// File-backed store
// =============================================================================

/// Store persisted as a JSON object in a single file.
///
/// The file is read once on open. Every mutation writes the complete new
/// state to a uniquely named temp file in the same directory and renames it
/// over the original; the in-memory copy is only replaced once the rename
/// succeeded.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    entries: RwLock<Entries>,
}

impl FileSessionStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let path = path.into();
        let entries = match fs::read(&path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Entries::new(),
            Ok(bytes) => {
                serde_json::from_slice(&bytes).map_err(|e| SessionError::Corrupt {
                    path: path.clone(),
                    message: e.to_string(),
                })?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Entries::new(),
            Err(source) => return Err(SessionError::Io { path, source }),
        };

        debug!(path = %path.display(), keys = entries.len(), "Opened session file");
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &Entries) -> Result<(), SessionError> {
        let io_err = |source| SessionError::Io {
            path: self.path.clone(),
            source,
        };

        let bytes = serde_json::to_vec_pretty(entries).map_err(|e| SessionError::Corrupt {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp_file = NamedTempFile::new_in(dir).map_err(io_err)?;
        tmp_file.write_all(&bytes).map_err(io_err)?;
        tmp_file.as_file().sync_all().map_err(io_err)?;
        tmp_file
            .persist(&self.path)
            .map_err(|err| io_err(err.error))?;
        Ok(())
    }

    fn update(&self, change: impl FnOnce(&Entries) -> Entries) -> Result<(), SessionError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let next = change(&entries);
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: SessionKey) -> Option<String> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        read_entry(&entries, key)
    }

    fn set_all(&self, session: &Session) -> Result<(), SessionError> {
        self.update(|entries| with_session(entries, session))
    }

    fn clear_all(&self) -> Result<(), SessionError> {
        self.update(without_known_keys)
    }

    fn set_scratch(&self, key: SessionKey, value: &str) -> Result<(), SessionError> {
        check_scratch(key)?;
        self.update(|entries| {
            let mut next = entries.clone();
            next.insert(key.as_str().to_string(), value.to_string());
            next
        })
    }
}
