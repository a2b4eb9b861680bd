use std::time::Duration;

/// Configuration constants for the profile store
pub mod profiles {
    /// Base name of the profile store file
    pub const FILE_STEM: &str = "osc.config";

    /// Extensions tried for the store file, in order ("" = bare file name)
    pub const FILE_EXTENSIONS: &[&str] = &["yaml", "yml", ""];

    /// Directories searched relative to HOME (after the current directory)
    pub const HOME_SEARCH_DIRS: &[&str] = &["", ".config"];

    /// Environment variable naming an explicit profile store file
    pub const ENV_VAR: &str = "OSC_CONFIG";
}

/// Locations of the files read by sensuctl
pub mod session {
    /// Cluster (session) file, relative to HOME
    pub const CLUSTER_FILE: &str = ".config/sensu/sensuctl/cluster";

    /// Profile (display) file, relative to HOME
    pub const PROFILE_FILE: &str = ".config/sensu/sensuctl/profile";
}

/// Backend API constants
pub mod api {
    use super::Duration;

    /// Credential probe endpoint
    pub const AUTH_TEST_PATH: &str = "/auth/test";

    /// Token exchange endpoint
    pub const AUTH_PATH: &str = "/auth";

    /// Request timeout for the connect round trip. Independent of the
    /// profile timeout, which is only handed to sensuctl.
    pub const CLIENT_TIMEOUT: Duration = Duration::from_secs(10);
}

/// Default values
pub mod defaults {
    use super::Duration;

    /// sensuctl output format
    pub const FORMAT: &str = "tabular";

    /// sensuctl namespace
    pub const NAMESPACE: &str = "default";

    /// Request timeout stored for sensuctl
    pub const TIMEOUT: Duration = Duration::from_secs(15);

    /// Default log level
    pub const LOG_LEVEL: &str = "warn";
}
