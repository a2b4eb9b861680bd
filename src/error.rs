use std::fmt;

/// Custom error type for osc operations
#[derive(Debug)]
pub enum OscError {
    /// Profile absent from the store, or present without an `api` endpoint
    ProfileNotFound(String),
    /// Profile store missing, unreadable or malformed
    ProfileStore(String),
    /// trusted-ca-file unreadable, not PEM, not X.509 or not a CA
    Tls(String),
    /// Credential probe did not return 200
    AuthFailed { profile: String, reason: String },
    /// Token exchange returned a non-200 status (strict mode only)
    TokenExchange { status: u16, message: String },
    /// HTTP request failed
    Http(reqwest::Error),
    /// JSON parsing error
    Json(String),
    /// Writing the sensuctl files failed
    Persist(String),
    /// Existing sensuctl files could not be read or validated
    Session(String),
    /// Configuration / usage error
    Config(String),
}

impl OscError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            OscError::ProfileNotFound(_) | OscError::ProfileStore(_) | OscError::Config(_) => 1,
            OscError::AuthFailed { .. } => 1,
            OscError::Tls(_) => 2,
            OscError::TokenExchange { .. } | OscError::Http(_) | OscError::Json(_) => 3,
            OscError::Persist(_) | OscError::Session(_) => 4,
        }
    }
}

impl fmt::Display for OscError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OscError::ProfileNotFound(name) => {
                write!(f, "Config profile ({}) does not exist.", name)
            }
            OscError::ProfileStore(msg) => write!(f, "Error loading config file: {}", msg),
            OscError::Tls(msg) => write!(f, "TLS setup failed: {}", msg),
            OscError::AuthFailed { profile, reason } => {
                write!(
                    f,
                    "Auth failed! Check profile credentials. (profile '{}': {})",
                    profile, reason
                )
            }
            OscError::TokenExchange { status, message } => {
                write!(f, "Token exchange failed (status {}): {}", status, message)
            }
            OscError::Http(e) => write!(f, "HTTP request failed: {}", e),
            OscError::Json(msg) => write!(f, "JSON error: {}", msg),
            OscError::Persist(msg) => write!(f, "Error connecting: {}", msg),
            OscError::Session(msg) => write!(f, "Invalid sensuctl session: {}", msg),
            OscError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for OscError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OscError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for OscError {
    fn from(err: reqwest::Error) -> Self {
        OscError::Http(err)
    }
}

impl From<serde_json::Error> for OscError {
    fn from(err: serde_json::Error) -> Self {
        OscError::Json(err.to_string())
    }
}

impl From<serde_yml::Error> for OscError {
    fn from(err: serde_yml::Error) -> Self {
        OscError::ProfileStore(err.to_string())
    }
}

impl From<std::io::Error> for OscError {
    fn from(err: std::io::Error) -> Self {
        OscError::Persist(err.to_string())
    }
}

/// Result type alias for osc operations
pub type Result<T> = std::result::Result<T, OscError>;
