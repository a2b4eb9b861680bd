//! Request-scoped connection parameters

use std::path::PathBuf;
use std::time::Duration;

use crate::error::Result;
use crate::profile::{Profile, ProfileStore};
use crate::session::DisplayDescriptor;

/// How a non-200 token exchange is treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TokenExchangePolicy {
    /// Keep going with empty token fields (historical behaviour)
    #[default]
    BestEffort,
    /// Fail the connect
    Strict,
}

/// Everything one connect needs, resolved from a profile with defaults applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectRequest {
    pub profile_name: String,
    pub endpoint: String,
    pub username: String,
    pub password: String,
    pub insecure: bool,
    pub trusted_ca_file: Option<PathBuf>,
    /// Stored for sensuctl; not applied to the connect requests
    pub timeout: Duration,
    pub display: DisplayDescriptor,
}

impl ConnectRequest {
    /// Resolve a profile by name
    pub fn from_store(store: &ProfileStore, profile_name: &str) -> Result<Self> {
        let profile = store.get(profile_name)?;
        Ok(Self::from_profile(profile_name, profile))
    }

    /// Build a request from a profile that is known to have an endpoint
    pub fn from_profile(profile_name: &str, profile: &Profile) -> Self {
        Self {
            profile_name: profile_name.to_string(),
            endpoint: profile.endpoint().unwrap_or_default().to_string(),
            username: profile.username().to_string(),
            password: profile.password().to_string(),
            insecure: profile.insecure(),
            trusted_ca_file: profile.trusted_ca_file().map(PathBuf::from),
            timeout: profile.effective_timeout(),
            display: DisplayDescriptor::from_profile(profile),
        }
    }

    /// Endpoint URL for an API path, without doubling slashes
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint.trim_end_matches('/'), path)
    }
}
