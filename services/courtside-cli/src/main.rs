//! Courtside CLI
//!
//! Drives the Courtside pages from the command line. Every command loads its
//! page the way a browser would: the session is refreshed and the navbar
//! rendered before the page action runs.
//!
//! ## Usage
//!
//! ```bash
//! courtside login laurin --password secret
//! courtside players create Roger Federer
//! courtside teams options
//! courtside teams create <player-one-id> <player-two-id> --name Fedal
//! courtside logout
//! ```
//!
//! The session lives in `COURTSIDE_SESSION_FILE` between invocations.

mod cli;
mod config;

use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;
use courtside_client::{ApiClient, ClientConfig, FileSessionStore};
use courtside_types::{PlayerId, Team, TeamId};
use courtside_web::pages::{
    CreatePlayerPage, CreateTeamPage, EditPlayerPage, EditTeamPage, LoginForm, LoginPage,
    PlayerForm, PlayersPage, RegisterForm, RegisterPage, TeamForm, TeamsPage,
};
use courtside_web::{navbar, NavItem, Outcome, PageContext};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, PlayersCommand, TeamsCommand};
use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging (stderr only - stdout is for pages)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?.with_overrides(&cli);

    let store = FileSessionStore::open(&config.session_file)
        .context("Failed to open session file")?;
    tracing::debug!(
        api_url = %config.api_url,
        session_file = %store.path().display(),
        "Starting Courtside"
    );

    let client_config = ClientConfig::builder()
        .base_url(&config.api_url)
        .request_timeout(config.request_timeout)
        .build()?;
    let api = ApiClient::new(client_config, Arc::new(store))?;
    let ctx = PageContext::new(api);

    match cli.command {
        Command::Nav { path } => {
            let frame = ctx.enter(&path).await;
            println!("{}", frame.navbar);
        }
        Command::Login { username, password } => {
            let frame = ctx.enter(LoginPage::PATH).await;
            let outcome = LoginPage::new(&ctx)
                .submit(&LoginForm { username, password })
                .await;
            println!("{}", frame.with_body(outcome));
        }
        Command::Register {
            username,
            email,
            password,
            confirm,
        } => {
            let frame = ctx.enter(RegisterPage::PATH).await;
            let form = RegisterForm {
                username,
                email,
                password,
                confirm,
            };
            let outcome = RegisterPage::new(&ctx).submit(&form).await;
            println!("{}", frame.with_body(outcome));
        }
        Command::Logout => {
            let frame = ctx.enter("/").await;
            if frame.navbar.contains(&NavItem::Logout) {
                if let Some(nav) = navbar::activate(&NavItem::Logout, ctx.auth()) {
                    println!("{nav}");
                }
            } else {
                println!("Not signed in");
            }
        }
        Command::Players(command) => players(&ctx, command).await?,
        Command::Teams(command) => teams(&ctx, command).await?,
    }

    Ok(())
}

async fn players(ctx: &PageContext, command: PlayersCommand) -> anyhow::Result<()> {
    let page = PlayersPage::new(ctx);

    match command {
        PlayersCommand::List => {
            let frame = ctx.enter(PlayersPage::PATH).await;
            println!("{}", frame.with_body(page.load().await));
        }
        PlayersCommand::Create {
            first_name,
            last_name,
        } => {
            let frame = ctx.enter(CreatePlayerPage::PATH).await;
            let form = PlayerForm {
                first_name,
                last_name,
            };
            let outcome = CreatePlayerPage::new(ctx).submit(&form).await;
            println!("{}", frame.with_body(outcome));
        }
        PlayersCommand::Edit {
            id,
            first_name,
            last_name,
        } => {
            let id = PlayerId::parse(&id).with_context(|| format!("Invalid player id: {id}"))?;
            ctx.enter(PlayersPage::PATH).await;
            let list = page.load().await;
            let Some(entry) = list.entries.iter().find(|e| e.player.id == id) else {
                bail!("No player with id {id}");
            };

            let path = match page.edit(&entry.player) {
                Outcome::Navigate(nav) => nav.path().to_string(),
                other => {
                    println!("{other}");
                    return Ok(());
                }
            };

            let frame = ctx.enter(&path).await;
            let edit = EditPlayerPage::new(ctx);
            let mut form = edit.prefill();
            if let Some(first_name) = first_name {
                form.first_name = first_name;
            }
            if let Some(last_name) = last_name {
                form.last_name = last_name;
            }
            let outcome = edit.submit(&path, &form).await;
            println!("{}", frame.with_body(outcome));
        }
        PlayersCommand::Delete { id } => {
            let id = PlayerId::parse(&id).with_context(|| format!("Invalid player id: {id}"))?;
            let frame = ctx.enter(PlayersPage::PATH).await;
            println!("{}", frame.with_body(page.delete(id).await));
        }
    }

    Ok(())
}

async fn teams(ctx: &PageContext, command: TeamsCommand) -> anyhow::Result<()> {
    let page = TeamsPage::new(ctx);

    match command {
        TeamsCommand::List => {
            let frame = ctx.enter(TeamsPage::PATH).await;
            println!("{}", frame.with_body(page.load().await));
        }
        TeamsCommand::Options => {
            let frame = ctx.enter(CreateTeamPage::PATH).await;
            println!("{}", frame.navbar);
            for option in CreateTeamPage::new(ctx).player_options().await {
                println!("{option}");
            }
        }
        TeamsCommand::Create {
            player_one,
            player_two,
            name,
        } => {
            let frame = ctx.enter(CreateTeamPage::PATH).await;
            let form = TeamForm {
                player_one,
                player_two,
                name,
            };
            let outcome = CreateTeamPage::new(ctx).submit(&form).await;
            println!("{}", frame.with_body(outcome));
        }
        TeamsCommand::Edit {
            id,
            player_one,
            player_two,
            name,
        } => {
            let id = TeamId::parse(&id).with_context(|| format!("Invalid team id: {id}"))?;
            ctx.enter(TeamsPage::PATH).await;
            let list = page.load().await;
            let Some(entry) = list.entries.iter().find(|e| e.team.id == id) else {
                bail!("No team with id {id}");
            };

            let path = match page.edit(&entry.team) {
                Outcome::Navigate(nav) => nav.path().to_string(),
                other => {
                    println!("{other}");
                    return Ok(());
                }
            };

            let frame = ctx.enter(&path).await;
            let edit = EditTeamPage::new(ctx);
            let form = team_changes(edit.prefill(), &entry.team, player_one, player_two, name);
            let outcome = edit.submit(&path, &form).await;
            println!("{}", frame.with_body(outcome));
        }
        TeamsCommand::Delete { id } => {
            let id = TeamId::parse(&id).with_context(|| format!("Invalid team id: {id}"))?;
            let frame = ctx.enter(TeamsPage::PATH).await;
            println!("{}", frame.with_body(page.delete(id).await));
        }
    }

    Ok(())
}

/// Apply `teams edit` flags to the prefilled form. The edit page does not
/// remember the team name, so an omitted `--name` keeps `current`'s.
fn team_changes(
    mut form: TeamForm,
    current: &Team,
    player_one: Option<String>,
    player_two: Option<String>,
    name: Option<String>,
) -> TeamForm {
    if let Some(player_one) = player_one {
        form.player_one = player_one;
    }
    if let Some(player_two) = player_two {
        form.player_two = player_two;
    }
    form.name = name.unwrap_or_else(|| current.name.clone());
    form
}
