//! Interactive profile selection

use dialoguer::{theme::ColorfulTheme, Select};
use log::debug;
use std::io::IsTerminal;

use crate::error::{OscError, Result};
use crate::profile::ProfileStore;

/// Ask the user which profile to connect to. Only possible on a terminal.
pub fn select_profile(profiles: &ProfileStore) -> Result<String> {
    let names = profiles.connectable_names();
    if names.is_empty() {
        return Err(OscError::Config(format!(
            "No profiles with an 'api' endpoint found{}",
            profiles
                .path()
                .map(|p| format!(" in {}", p.display()))
                .unwrap_or_default()
        )));
    }

    if !(std::io::stdin().is_terminal() && std::io::stderr().is_terminal()) {
        return Err(OscError::Config(format!(
            "No profile given. Usage: osc connect <PROFILE>\nAvailable profiles: {}",
            names.join(", ")
        )));
    }

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select a profile")
        .items(&names)
        .default(0)
        .interact()
        .map_err(|e| OscError::Config(format!("Failed to select profile: {}", e)))?;

    let name = names[selection].to_string();
    debug!("User selected profile: {}", name);
    Ok(name)
}
