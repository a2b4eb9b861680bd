//! sensuctl cluster/profile file I/O

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::session as session_config;
use crate::error::{OscError, Result};
use crate::profile::ProfileStore;

use super::models::{ActiveSession, DisplayDescriptor, SessionDescriptor};

/// Reads and writes the pair of files sensuctl uses for its active session
pub struct SessionStore {
    cluster_path: PathBuf,
    profile_path: PathBuf,
}

impl SessionStore {
    /// Create a store using sensuctl's files under the home directory
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir().ok_or_else(|| {
            OscError::Persist("Unable to determine the home directory".to_string())
        })?;
        Ok(Self::with_paths(
            home.join(session_config::CLUSTER_FILE),
            home.join(session_config::PROFILE_FILE),
        ))
    }

    /// Create a store with custom file locations (for testing)
    pub fn with_paths(cluster_path: PathBuf, profile_path: PathBuf) -> Self {
        Self {
            cluster_path,
            profile_path,
        }
    }

    pub fn cluster_path(&self) -> &Path {
        &self.cluster_path
    }

    pub fn profile_path(&self) -> &Path {
        &self.profile_path
    }

    /// Read back the active session. Missing, unreadable or invalid files
    /// come back as `None`.
    pub fn load(&self) -> ActiveSession {
        ActiveSession {
            session: read_document::<SessionDescriptor>(&self.cluster_path),
            display: read_document::<DisplayDescriptor>(&self.profile_path),
        }
    }

    /// Persist a session, re-deriving the display settings from the named
    /// profile
    pub fn persist_profile(
        &self,
        session: &SessionDescriptor,
        profiles: &ProfileStore,
        profile_name: &str,
    ) -> Result<()> {
        let profile = profiles.get(profile_name)?;
        self.persist(session, &DisplayDescriptor::from_profile(profile))
    }

    /// Write both documents, replacing any previous content.
    ///
    /// Both files are staged next to their targets before either target is
    /// touched. If the second rename fails the first target is restored.
    pub fn persist(&self, session: &SessionDescriptor, display: &DisplayDescriptor) -> Result<()> {
        let cluster_json = to_document(session)?;
        let profile_json = to_document(display)?;

        for path in [&self.cluster_path, &self.profile_path] {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|e| {
                    OscError::Persist(format!(
                        "Failed to create directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let cluster_tmp = staging_path(&self.cluster_path);
        let profile_tmp = staging_path(&self.profile_path);

        let staged = write_staged(&cluster_tmp, &cluster_json)
            .and_then(|_| write_staged(&profile_tmp, &profile_json));
        if let Err(e) = staged {
            discard(&[cluster_tmp.as_path(), profile_tmp.as_path()]);
            return Err(e);
        }

        let previous_cluster = fs::read(&self.cluster_path).ok();

        if let Err(e) = fs::rename(&cluster_tmp, &self.cluster_path) {
            discard(&[cluster_tmp.as_path(), profile_tmp.as_path()]);
            return Err(OscError::Persist(format!(
                "Failed to write {}: {}",
                self.cluster_path.display(),
                e
            )));
        }

        if let Err(e) = fs::rename(&profile_tmp, &self.profile_path) {
            discard(&[profile_tmp.as_path()]);
            self.restore_cluster(previous_cluster);
            return Err(OscError::Persist(format!(
                "Failed to write {}: {}",
                self.profile_path.display(),
                e
            )));
        }

        debug!(
            "Wrote {} and {}",
            self.cluster_path.display(),
            self.profile_path.display()
        );
        Ok(())
    }

    fn restore_cluster(&self, previous: Option<Vec<u8>>) {
        let restored = match previous {
            Some(bytes) => fs::write(&self.cluster_path, bytes),
            None => fs::remove_file(&self.cluster_path),
        };
        if let Err(e) = restored {
            warn!(
                "Could not restore {} after failed write: {}",
                self.cluster_path.display(),
                e
            );
        }
    }
}

/// Pretty JSON with two-space indentation, no trailing newline
fn to_document<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| OscError::Persist(format!("Failed to serialize session: {}", e)))
}

fn staging_path(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    target.with_file_name(name)
}

fn write_staged(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| {
        OscError::Persist(format!(
            "Failed to write temp file {}: {}",
            path.display(),
            e
        ))
    })?;

    // Tokens inside: owner-only on Unix
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|e| {
            OscError::Persist(format!(
                "Failed to set permissions on {}: {}",
                path.display(),
                e
            ))
        })?;
    }

    Ok(())
}

fn discard(paths: &[&Path]) {
    for path in paths {
        if path.exists() {
            let _ = fs::remove_file(path);
        }
    }
}

fn read_document<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            debug!("Unable to read {}: {}", path.display(), e);
            return None;
        }
    };
    match serde_json::from_str(&content) {
        Ok(doc) => Some(doc),
        Err(e) => {
            debug!("Ignoring invalid {}: {}", path.display(), e);
            None
        }
    }
}
