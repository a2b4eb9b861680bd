//! Profile table formatter

use comfy_table::{presets::NOTHING, Table};

use crate::profile::ProfileStore;
use crate::session::ActiveSession;

use super::ProfileRow;

const HEADERS: [&str; 7] = [
    "", "Profile", "Environment", "Username", "Namespace", "Format", "API",
];

/// Build the table of all profiles, marking the one sensuctl is using
pub fn profiles_table(profiles: &ProfileStore, active: &ActiveSession) -> Table {
    let active_api = active.api_url();
    let mut rows: Vec<ProfileRow> = profiles
        .profiles()
        .iter()
        .map(|(name, profile)| ProfileRow::new(name, profile, active_api))
        .chain(profiles.invalid_profiles().keys().map(|name| ProfileRow::invalid(name)))
        .collect();
    rows.sort_by(|a, b| a.name.cmp(&b.name));

    let mut table = Table::new();
    table.load_preset(NOTHING).set_header(HEADERS.to_vec());

    for row in &rows {
        let marker = if row.current { "*" } else { "" };
        table.add_row(vec![
            marker,
            row.name.as_str(),
            row.environment.as_str(),
            row.username.as_str(),
            row.namespace.as_str(),
            row.format.as_str(),
            row.api.as_str(),
        ]);
    }

    table
}
