//! Session and display descriptor models

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::profile::Profile;
use crate::sensu::ConnectRequest;

/// Credentials and connection settings written to sensuctl's cluster file.
///
/// Field order and key names match what sensuctl expects. `timeout` is
/// encoded as integer nanoseconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionDescriptor {
    #[serde(rename = "api-url", default)]
    pub api_url: String,
    #[serde(rename = "trusted-ca-file", default)]
    pub trusted_ca_file: String,
    #[serde(rename = "insecure-skip-tls-verify", default)]
    pub insecure_skip_tls_verify: bool,
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub expires_at: i64,
    #[serde(default)]
    pub refresh_token: String,
    /// Older writers emitted this key as `Timeout`
    #[serde(with = "duration_nanos", alias = "Timeout", default)]
    pub timeout: Duration,
}

impl SessionDescriptor {
    /// Build a descriptor from a resolved connect request and the tokens
    /// issued by the backend
    pub fn new(request: &ConnectRequest, tokens: TokenResponse) -> Self {
        Self {
            api_url: request.endpoint.clone(),
            trusted_ca_file: request
                .trusted_ca_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            insecure_skip_tls_verify: request.insecure,
            access_token: tokens.access_token,
            expires_at: tokens.expires_at,
            refresh_token: tokens.refresh_token,
            timeout: request.timeout,
        }
    }
}

/// Output preferences written to sensuctl's profile file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayDescriptor {
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub namespace: String,
}

impl DisplayDescriptor {
    /// Derive display settings from a profile, applying sensuctl defaults
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            format: profile.display_format().to_string(),
            namespace: profile.display_namespace().to_string(),
        }
    }
}

/// Body of a successful `GET /auth`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub expires_at: i64,
    #[serde(default)]
    pub refresh_token: String,
}

/// What `list` found on disk; either half may be missing or invalid
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveSession {
    pub session: Option<SessionDescriptor>,
    pub display: Option<DisplayDescriptor>,
}

impl ActiveSession {
    /// API URL of the active session, if one was read
    pub fn api_url(&self) -> Option<&str> {
        self.session
            .as_ref()
            .map(|s| s.api_url.as_str())
            .filter(|url| !url.is_empty())
    }
}

mod duration_nanos {
    use serde::ser::Error;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let nanos = i64::try_from(value.as_nanos())
            .map_err(|_| S::Error::custom(format!("timeout {:?} out of range", value)))?;
        serializer.serialize_i64(nanos)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_nanos)
    }
}
