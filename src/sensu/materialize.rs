//! Profile-to-session materialization

use log::{debug, warn};

use crate::error::{OscError, Result};
use crate::profile::ProfileStore;
use crate::session::{SessionDescriptor, TokenResponse};

use super::client::{AuthClient, TokenOutcome};
use super::request::{ConnectRequest, TokenExchangePolicy};

/// Turns a profile name into a session descriptor. Makes at most two
/// requests (probe, then token exchange) and never touches the disk.
pub struct Materializer<'a> {
    profiles: &'a ProfileStore,
    policy: TokenExchangePolicy,
}

impl<'a> Materializer<'a> {
    pub fn new(profiles: &'a ProfileStore) -> Self {
        Self {
            profiles,
            policy: TokenExchangePolicy::default(),
        }
    }

    /// Set how a non-200 token exchange is handled
    pub fn with_policy(mut self, policy: TokenExchangePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Resolve `profile_name` and authenticate against its backend
    pub async fn materialize(&self, profile_name: &str) -> Result<SessionDescriptor> {
        let request = ConnectRequest::from_store(self.profiles, profile_name)?;
        self.materialize_request(&request).await
    }

    /// Authenticate with an already resolved request
    pub async fn materialize_request(&self, request: &ConnectRequest) -> Result<SessionDescriptor> {
        let client = AuthClient::new(request)?;

        client.probe(request).await?;
        debug!("Credentials accepted for profile '{}'", request.profile_name);

        let tokens = match client.exchange(request).await? {
            TokenOutcome::Issued(tokens) => tokens,
            TokenOutcome::Rejected { status } => match self.policy {
                TokenExchangePolicy::Strict => {
                    return Err(OscError::TokenExchange {
                        status,
                        message: format!(
                            "backend for profile '{}' did not issue tokens",
                            request.profile_name
                        ),
                    })
                }
                TokenExchangePolicy::BestEffort => {
                    warn!(
                        "Token exchange for profile '{}' returned status {}; writing session without tokens",
                        request.profile_name, status
                    );
                    TokenResponse::default()
                }
            },
        };

        Ok(SessionDescriptor::new(request, tokens))
    }
}
