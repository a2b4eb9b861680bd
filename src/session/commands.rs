//! connect / list command handlers

use log::debug;
use std::io::IsTerminal;
use std::path::Path;

use crate::cli::ConnectArgs;
use crate::error::Result;
use crate::output::{profiles_table, render_active_session};
use crate::profile::ProfileStore;
use crate::sensu::{Materializer, TokenExchangePolicy};
use crate::ui::{create_spinner, finish_spinner, select_profile};

use super::models::{ActiveSession, SessionDescriptor};
use super::store::SessionStore;

/// Authenticate with a profile and point sensuctl at its backend
pub async fn run_connect_command(config_path: Option<&Path>, args: &ConnectArgs) -> Result<()> {
    let profiles = ProfileStore::discover(config_path)?;

    let name = match &args.profile {
        Some(name) => name.clone(),
        None => select_profile(&profiles)?,
    };
    let policy = if args.strict_token_exchange {
        TokenExchangePolicy::Strict
    } else {
        TokenExchangePolicy::BestEffort
    };

    let sessions = SessionStore::new()?;
    let quiet = !std::io::stderr().is_terminal();
    let session = connect(&profiles, &sessions, &name, policy, quiet).await?;

    println!("Connected to Sensu backend: {} ({})", name, session.api_url);
    Ok(())
}

/// Materialize a session for `name` and write it for sensuctl. Nothing is
/// written unless authentication succeeds.
pub async fn connect(
    profiles: &ProfileStore,
    sessions: &SessionStore,
    name: &str,
    policy: TokenExchangePolicy,
    quiet: bool,
) -> Result<SessionDescriptor> {
    let spinner = create_spinner(&format!("Authenticating with profile '{}'...", name), quiet);
    let materialized = Materializer::new(profiles)
        .with_policy(policy)
        .materialize(name)
        .await;
    finish_spinner(spinner);

    let session = materialized?;
    sessions.persist_profile(&session, profiles, name)?;
    Ok(session)
}

/// Show the active sensuctl session and every configured profile.
/// Problems are reported but never fail the command.
pub fn run_list_command(config_path: Option<&Path>) {
    let active = match SessionStore::new() {
        Ok(store) => store.load(),
        Err(e) => {
            debug!("Skipping active session: {}", e);
            ActiveSession::default()
        }
    };

    let profiles = match ProfileStore::discover(config_path) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{}", e);
            ProfileStore::default()
        }
    };

    print!("{}", render_active_session(&active, chrono::Utc::now()));
    println!("{}", profiles_table(&profiles, &active));
}
