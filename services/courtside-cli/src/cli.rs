//! Command-line surface

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "courtside",
    about = "Keep records of your tennis players and teams",
    version
)]
pub struct Cli {
    /// Base URL of the API (overrides COURTSIDE_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Session file (overrides COURTSIDE_SESSION_FILE)
    #[arg(long, global = true, value_name = "PATH")]
    pub session_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the navbar for a page
    Nav {
        /// Page path
        #[arg(default_value = "/")]
        path: String,
    },

    /// Sign in with a username or email
    Login {
        /// Username or email
        username: String,

        #[arg(long, env = "COURTSIDE_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account and sign in
    Register {
        username: String,

        email: String,

        #[arg(long, env = "COURTSIDE_PASSWORD", hide_env_values = true)]
        password: String,

        /// Password again
        #[arg(long)]
        confirm: String,
    },

    /// Sign out and forget the session
    Logout,

    /// Manage players
    #[command(subcommand)]
    Players(PlayersCommand),

    /// Manage doubles teams
    #[command(subcommand)]
    Teams(TeamsCommand),
}

#[derive(Subcommand, Debug)]
pub enum PlayersCommand {
    /// List your players
    List,

    /// Create a player
    Create {
        first_name: String,
        last_name: String,
    },

    /// Rename a player; omitted names are kept
    Edit {
        /// Player id
        id: String,

        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,
    },

    /// Delete a player
    Delete {
        /// Player id
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum TeamsCommand {
    /// List your doubles teams
    List,

    /// List the players a team can be built from
    Options,

    /// Create a team from two player ids
    Create {
        player_one: String,

        player_two: String,

        #[arg(long, default_value = "")]
        name: String,
    },

    /// Change a team; omitted players and name are kept
    Edit {
        /// Team id
        id: String,

        #[arg(long)]
        player_one: Option<String>,

        #[arg(long)]
        player_two: Option<String>,

        /// New name; the current name is kept when omitted
        #[arg(long)]
        name: Option<String>,
    },

    /// Delete a team
    Delete {
        /// Team id
        id: String,
    },
}
