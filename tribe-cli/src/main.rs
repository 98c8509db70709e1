//! tribe - TribeNet command-line client
//!
//! Every invocation restores the stored session, runs one command and
//! exits non-zero on failure.

mod cli;
mod commands;
mod logger;
mod output;
mod prompt;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tribe_client::view::Notice;
use tribe_client::{ClientConfig, ClientError, FileStore, TribeClient};

use cli::{Cli, Commands};
use output::{print_error, print_notice};
use prompt::TerminalConfirm;

/// Session file inside the data directory
const SESSION_FILE: &str = "session.json";

#[tokio::main]
async fn main() {
    // Load .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        match e.downcast_ref::<ClientError>() {
            Some(err) => {
                tracing::debug!(error = %err, "Command failed");
                print_notice(&Notice::from_error(err));
            }
            None => print_error(&format!("{e:#}")),
        }
        std::process::exit(1);
    }
}

/// Commands that check the cached club role before acting
fn needs_memberships(command: &Commands) -> bool {
    matches!(
        command,
        Commands::Show { .. }
            | Commands::Edit(_)
            | Commands::Delete { .. }
            | Commands::Join { .. }
            | Commands::Leave { .. }
            | Commands::Promote { .. }
            | Commands::RemoveMember { .. }
    )
}

async fn run(cli: Cli) -> Result<()> {
    logger::init_logger(&cli.log_level, cli.log_json, cli.log_dir.as_deref())?;

    let mut config = ClientConfig::from_env();
    if let Some(server) = &cli.server {
        config.base_url = server.clone();
    }
    tracing::debug!(base_url = %config.base_url, "Starting");

    let store = Arc::new(FileStore::new(cli.data_dir.clone(), SESSION_FILE));
    tracing::debug!(path = %store.path().display(), "Session store");
    let client = TribeClient::new(config, store)?;
    client.restore_session().await;

    if needs_memberships(&cli.command) && client.session().await.is_some() {
        client.refresh().await?;
    }

    let confirm = TerminalConfirm::new(cli.yes);

    match &cli.command {
        Commands::Login(args) => commands::auth::login(&client, args).await?,
        Commands::Register(args) => commands::auth::register(&client, args).await?,
        Commands::Logout => commands::auth::logout(&client).await?,
        Commands::Whoami => commands::auth::whoami(&client).await?,
        Commands::Dashboard => commands::clubs::dashboard(&client).await?,
        Commands::Clubs(args) => commands::clubs::list(&client, args).await?,
        Commands::MyClubs => commands::clubs::my_clubs(&client).await?,
        Commands::Show { club_id } => commands::clubs::show(&client, *club_id).await?,
        Commands::Create(args) => commands::clubs::create(&client, args).await?,
        Commands::Edit(args) => commands::clubs::edit(&client, args).await?,
        Commands::Delete { club_id } => {
            commands::clubs::delete(&client, *club_id, &confirm).await?
        }
        Commands::Join { club_id } => commands::clubs::join(&client, *club_id).await?,
        Commands::Leave { club_id } => {
            commands::clubs::leave(&client, *club_id, &confirm).await?
        }
        Commands::Promote { club_id, user_id } => {
            commands::clubs::promote(&client, *club_id, *user_id, &confirm).await?
        }
        Commands::RemoveMember { club_id, user_id } => {
            commands::clubs::remove_member(&client, *club_id, *user_id, &confirm).await?
        }
        Commands::Users(args) => commands::users::directory(&client, args).await?,
        Commands::Payments(args) => commands::users::payments(&client, args).await?,
        Commands::Admin(args) => {
            commands::users::admin(&client, &args.command, &confirm).await?
        }
    }

    Ok(())
}
