//! Profile store file discovery and parsing

use log::{debug, warn};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::profiles as profiles_config;
use crate::error::{OscError, Result};

use super::models::Profile;

/// Read-only handle over the profiles declared in `osc.config`
#[derive(Debug, Default, Clone)]
pub struct ProfileStore {
    path: Option<PathBuf>,
    profiles: BTreeMap<String, Profile>,
    /// Entries that failed to parse, with the reason
    invalid: BTreeMap<String, String>,
}

impl ProfileStore {
    /// Locate and load the store:
    /// 1. explicit path (`--config` / `OSC_CONFIG`)
    /// 2. `osc.config.{yaml,yml}` or bare `osc.config` in `.`, `~`, `~/.config`
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            debug!("Using profile store from CLI/env: {}", path.display());
            return Self::from_path(path);
        }

        let candidates = Self::candidate_paths();
        match candidates.iter().find(|p| p.is_file()) {
            Some(path) => {
                debug!("Found profile store at {}", path.display());
                Self::from_path(path)
            }
            None => Err(OscError::ProfileStore(format!(
                "Config File \"{}\" Not Found in [{}]",
                profiles_config::FILE_STEM,
                Self::search_dirs()
                    .iter()
                    .map(|d| d.display().to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            ))),
        }
    }

    /// Load the store from a specific file
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            OscError::ProfileStore(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let mut store = Self::from_yaml_str(&content).map_err(|e| match e {
            OscError::ProfileStore(msg) => {
                OscError::ProfileStore(format!("Failed to parse {}: {}", path.display(), msg))
            }
            other => other,
        })?;
        store.path = Some(path.to_path_buf());
        Ok(store)
    }

    /// Parse a store from YAML text. Profile names and attribute keys are
    /// case-insensitive and normalised to lower case.
    ///
    /// A malformed profile does not fail the store: it is kept by name and
    /// only reported when looked up.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let document: serde_yml::Value = serde_yml::from_str(content)?;

        let mapping = match document {
            serde_yml::Value::Null => return Ok(Self::default()),
            serde_yml::Value::Mapping(m) => m,
            _ => {
                return Err(OscError::ProfileStore(
                    "top level must be a mapping of profile names".to_string(),
                ))
            }
        };

        let mut profiles = BTreeMap::new();
        let mut invalid = BTreeMap::new();
        for (key, value) in mapping {
            let Some(name) = key.as_str().map(str::to_lowercase) else {
                warn!("Ignoring non-string profile key {:?}", key);
                continue;
            };
            let serde_yml::Value::Mapping(attributes) = value else {
                warn!("Ignoring '{}': not a profile mapping", name);
                continue;
            };

            let normalized: serde_yml::Mapping = attributes
                .into_iter()
                .map(|(k, v)| match k {
                    serde_yml::Value::String(s) => (serde_yml::Value::String(s.to_lowercase()), v),
                    other => (other, v),
                })
                .collect();

            match serde_yml::from_value::<Profile>(serde_yml::Value::Mapping(normalized)) {
                Ok(profile) => {
                    profiles.insert(name, profile);
                }
                Err(e) => {
                    warn!("Profile '{}' is invalid: {}", name, e);
                    invalid.insert(name, e.to_string());
                }
            }
        }

        debug!(
            "Loaded {} profile(s), {} invalid",
            profiles.len(),
            invalid.len()
        );
        Ok(Self {
            path: None,
            profiles,
            invalid,
        })
    }

    /// Look up a profile by name. A profile without an `api` endpoint is
    /// indistinguishable from a missing one.
    pub fn get(&self, name: &str) -> Result<&Profile> {
        let key = name.to_lowercase();
        if let Some(reason) = self.invalid.get(&key) {
            return Err(OscError::ProfileStore(match &self.path {
                Some(path) => format!(
                    "Invalid profile '{}' in {}: {}",
                    key,
                    path.display(),
                    reason
                ),
                None => format!("Invalid profile '{}': {}", key, reason),
            }));
        }
        self.profiles
            .get(&key)
            .filter(|p| p.endpoint().is_some())
            .ok_or_else(|| OscError::ProfileNotFound(name.to_string()))
    }

    /// All profiles, ordered by name
    pub fn profiles(&self) -> &BTreeMap<String, Profile> {
        &self.profiles
    }

    /// Profiles that failed to parse, with the reason, ordered by name
    pub fn invalid_profiles(&self) -> &BTreeMap<String, String> {
        &self.invalid
    }

    /// Names of profiles that can be connected to
    pub fn connectable_names(&self) -> Vec<&str> {
        self.profiles
            .iter()
            .filter(|(_, p)| p.endpoint().is_some())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// File the store was loaded from, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn search_dirs() -> Vec<PathBuf> {
        let mut search = vec![PathBuf::from(".")];
        if let Some(home) = dirs::home_dir() {
            for sub in profiles_config::HOME_SEARCH_DIRS {
                search.push(if sub.is_empty() {
                    home.clone()
                } else {
                    home.join(sub)
                });
            }
        }
        search
    }

    fn candidate_paths() -> Vec<PathBuf> {
        Self::search_dirs()
            .into_iter()
            .flat_map(|dir| {
                profiles_config::FILE_EXTENSIONS.iter().map(move |ext| {
                    if ext.is_empty() {
                        dir.join(profiles_config::FILE_STEM)
                    } else {
                        dir.join(format!("{}.{}", profiles_config::FILE_STEM, ext))
                    }
                })
            })
            .collect()
    }
}
