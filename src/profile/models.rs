//! Profile data models

use serde::{Deserialize, Deserializer};
use std::time::Duration;

use crate::config::defaults;

/// A named profile: connection parameters for one Sensu backend
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Profile {
    /// Backend API base URL
    #[serde(default, deserialize_with = "scalar_string")]
    pub api: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    pub password: Option<String>,
    /// Skip server certificate verification
    #[serde(default, alias = "insecure")]
    pub insecure_skip_tls_verify: Option<bool>,
    /// PEM file holding an extra trusted CA certificate
    #[serde(default, deserialize_with = "scalar_string")]
    pub trusted_ca_file: Option<String>,
    /// Request timeout handed to sensuctl
    #[serde(default, deserialize_with = "duration_value")]
    pub timeout: Option<Duration>,
    /// sensuctl output format
    #[serde(default, deserialize_with = "scalar_string")]
    pub format: Option<String>,
    /// sensuctl namespace
    #[serde(default, deserialize_with = "scalar_string")]
    pub namespace: Option<String>,
    /// Free-form environment label, only shown by `list`
    #[serde(default, deserialize_with = "scalar_string")]
    pub env: Option<String>,
}

impl Profile {
    /// The API endpoint, if set and non-empty
    pub fn endpoint(&self) -> Option<&str> {
        non_empty(&self.api)
    }

    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or_default()
    }

    pub fn password(&self) -> &str {
        self.password.as_deref().unwrap_or_default()
    }

    pub fn insecure(&self) -> bool {
        self.insecure_skip_tls_verify.unwrap_or(false)
    }

    /// trusted-ca-file path, if set and non-empty
    pub fn trusted_ca_file(&self) -> Option<&str> {
        non_empty(&self.trusted_ca_file)
    }

    /// Output format with the sensuctl default applied
    pub fn display_format(&self) -> &str {
        non_empty(&self.format).unwrap_or(defaults::FORMAT)
    }

    /// Namespace with the sensuctl default applied
    pub fn display_namespace(&self) -> &str {
        non_empty(&self.namespace).unwrap_or(defaults::NAMESPACE)
    }

    /// Timeout with the default applied
    pub fn effective_timeout(&self) -> Duration {
        self.timeout.unwrap_or(defaults::TIMEOUT)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Accept any YAML scalar where a string is expected (`password: 1234`)
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_yml::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_yml::Value::Null) => Ok(None),
        Some(serde_yml::Value::String(s)) => Ok(Some(s)),
        Some(serde_yml::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(serde_yml::Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a scalar value, found {:?}",
            other
        ))),
    }
}

/// Timeout as a duration string (`15s`, `1m30s`) or a bare number of seconds
fn duration_value<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    match scalar_string(deserializer)? {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => parse_duration(&s).map(Some).map_err(serde::de::Error::custom),
    }
}

/// Longest duration sensuctl can hold (signed 64-bit nanoseconds)
const MAX_NANOS: u128 = i64::MAX as u128;

/// Parse a duration such as `15s`, `1m30s`, `500ms`, `1.5h` or `30` (seconds)
pub fn parse_duration(input: &str) -> Result<Duration, String> {
    let s = input.trim();
    if s.is_empty() {
        return Err("empty duration".to_string());
    }
    let out_of_range = || format!("duration '{}' out of range", input);
    if s.bytes().all(|b| b.is_ascii_digit()) {
        let secs: u64 = s.parse().map_err(|_| out_of_range())?;
        let total = Duration::from_secs(secs);
        if total.as_nanos() > MAX_NANOS {
            return Err(out_of_range());
        }
        return Ok(total);
    }

    let invalid = || format!("invalid duration '{}'", input);
    let mut total = Duration::ZERO;
    let mut rest = s;
    while !rest.is_empty() {
        let num_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        if num_len == 0 {
            return Err(invalid());
        }
        let value: f64 = rest[..num_len].parse().map_err(|_| invalid())?;
        rest = &rest[num_len..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let nanos_per_unit: f64 = match &rest[..unit_len] {
            "ns" => 1.0,
            "us" | "µs" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 60e9,
            "h" => 3600e9,
            "" => return Err(format!("missing unit in duration '{}'", input)),
            unit => {
                return Err(format!(
                    "unknown unit '{}' in duration '{}'",
                    unit, input
                ))
            }
        };
        let nanos = (value * nanos_per_unit).round();
        if nanos > MAX_NANOS as f64 {
            return Err(out_of_range());
        }
        total += Duration::from_nanos(nanos as u64);
        if total.as_nanos() > MAX_NANOS {
            return Err(out_of_range());
        }
        rest = &rest[unit_len..];
    }
    Ok(total)
}
