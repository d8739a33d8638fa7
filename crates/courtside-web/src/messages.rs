//! User-facing messages
//!
//! The API reports failures as raw server text (constraint names, driver
//! errors). [`classify`] turns that text into the sentence shown under a form.
//! Client-side validation reuses the same path by classifying a sentinel, so a
//! locally caught mistake reads exactly like one the server rejected.

/// Shown when nothing more specific matches.
pub const GENERIC_ERROR: &str = "Error with request";

/// Sentinel for a password that does not match its confirmation.
pub const PASSWORD_MISMATCH: &str = "password";
/// Sentinel for a team made of the same player twice.
pub const SAME_PLAYER: &str = "team";
/// Sentinel for a team missing one of its players.
pub const MISSING_PLAYER: &str = "no player";

pub const PLAYERS_FETCH_FAILED: &str = "Couldn't fetch players";
pub const TEAMS_FETCH_FAILED: &str = "Couldn't fetch teams";
pub const NO_PLAYERS: &str = "No players created yet";
pub const NO_TEAMS: &str = "No teams created yet";

pub const PLAYER_CREATED: &str = "Player was successfully created";
pub const PLAYER_UPDATED: &str = "Player was successfully updated";
pub const TEAM_CREATED: &str = "Team was successfully created";
pub const TEAM_UPDATED: &str = "Team was successfully updated";

/// Team label placeholder for an unnamed team.
pub const NO_TEAM_NAME: &str = "[No Team name]";
/// Team label placeholder for a player id missing from the player list.
pub const UNKNOWN_PLAYER: &str = "[Unknown Player]";

/// Map a server or sentinel message to the sentence shown to the user.
///
/// Checks run in order and the first hit wins; matching is case-sensitive.
pub fn classify(message: &str) -> &'static str {
    if message.contains("users_username_unique") {
        "Username already exists"
    } else if message.contains("users_email_unique") {
        "Email already exists"
    } else if message == PASSWORD_MISMATCH {
        "Wrong Password combination"
    } else if message.contains("no rows in result set") {
        "Wrong Username"
    } else if message.contains("hashedPassword") {
        "Wrong Password"
    } else if message.contains(SAME_PLAYER) {
        "Please enter two different Players"
    } else if message.contains(MISSING_PLAYER) {
        "Please enter two Players"
    } else {
        GENERIC_ERROR
    }
}
