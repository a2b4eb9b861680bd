//! Output formatting for `list`

mod active;
mod table;

use crate::profile::Profile;

pub use self::active::render_active_session;
pub use self::table::profiles_table;

/// Flattened profile data for the listing table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRow {
    pub current: bool,
    pub name: String,
    pub environment: String,
    pub username: String,
    pub namespace: String,
    pub format: String,
    pub api: String,
}

impl ProfileRow {
    /// Create a row; `active_api` marks the profile sensuctl currently uses.
    /// Values are shown as declared, without defaults.
    pub fn new(name: &str, profile: &Profile, active_api: Option<&str>) -> Self {
        let api = profile.api.clone().unwrap_or_default();
        Self {
            current: active_api.is_some_and(|a| !api.is_empty() && a == api),
            name: name.to_string(),
            environment: profile.env.clone().unwrap_or_default(),
            username: profile.username.clone().unwrap_or_default(),
            namespace: profile.namespace.clone().unwrap_or_default(),
            format: profile.format.clone().unwrap_or_default(),
            api,
        }
    }

    /// Row for a profile that failed to parse; only the name is known
    pub fn invalid(name: &str) -> Self {
        Self {
            current: false,
            name: name.to_string(),
            environment: String::new(),
            username: String::new(),
            namespace: String::new(),
            format: String::new(),
            api: "(invalid)".to_string(),
        }
    }
}

/// A line of box-drawing characters as wide as `s`
pub fn underline(s: &str) -> String {
    "\u{2500}".repeat(s.chars().count())
}
