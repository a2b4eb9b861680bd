//! HTTP client for the backend auth endpoints

use log::debug;
use reqwest::{Client, StatusCode};

use crate::config::api;
use crate::error::{OscError, Result};
use crate::session::TokenResponse;

use super::request::ConnectRequest;
use super::tls;

/// Result of `GET /auth`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenOutcome {
    /// 200 with a decoded body
    Issued(TokenResponse),
    /// Any other status
    Rejected { status: u16 },
}

/// Backend auth client, configured from one connect request
pub struct AuthClient {
    client: Client,
}

impl AuthClient {
    /// Build a client with the fixed connect timeout and the request's TLS
    /// settings. A bad trusted-ca-file fails here, before any request.
    pub fn new(request: &ConnectRequest) -> Result<Self> {
        let mut builder = Client::builder().timeout(api::CLIENT_TIMEOUT);

        if request.insecure {
            debug!("TLS certificate verification disabled");
            builder = builder.tls_danger_accept_invalid_certs(true);
        }

        if let Some(ca_file) = &request.trusted_ca_file {
            let cert = tls::load_trusted_ca(ca_file)?;
            builder = builder.tls_certs_merge([cert]);
        }

        let client = builder
            .build()
            .map_err(|e| OscError::Tls(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Check credentials with `GET /auth/test`. Only a 200 counts; transport
    /// errors are reported as authentication failures too.
    pub async fn probe(&self, request: &ConnectRequest) -> Result<()> {
        let url = request.url(api::AUTH_TEST_PATH);
        debug!("Probing credentials at {}", url);

        let auth_failed = |reason: String| OscError::AuthFailed {
            profile: request.profile_name.clone(),
            reason,
        };

        let response = self
            .client
            .get(&url)
            .basic_auth(&request.username, Some(&request.password))
            .send()
            .await
            .map_err(|e| auth_failed(e.to_string()))?;

        match response.status() {
            StatusCode::OK => Ok(()),
            status => {
                debug!("Probe returned {}", status);
                Err(auth_failed(format!("status {}", status.as_u16())))
            }
        }
    }

    /// Request tokens with `GET /auth`
    pub async fn exchange(&self, request: &ConnectRequest) -> Result<TokenOutcome> {
        let url = request.url(api::AUTH_PATH);
        debug!("Requesting tokens from {}", url);

        let response = self
            .client
            .get(&url)
            .basic_auth(&request.username, Some(&request.password))
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {
                let body = response.bytes().await?;
                let tokens: TokenResponse = serde_json::from_slice(&body)?;
                Ok(TokenOutcome::Issued(tokens))
            }
            status => {
                debug!("Token exchange returned {}", status);
                Ok(TokenOutcome::Rejected {
                    status: status.as_u16(),
                })
            }
        }
    }
}
