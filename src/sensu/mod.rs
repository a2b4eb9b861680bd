//! Sensu backend authentication
//!
//! Turns a named profile into a session: TLS setup, credential probe and
//! token exchange against the backend API.

mod client;
mod materialize;
mod request;
mod tls;

pub use client::{AuthClient, TokenOutcome};
pub use materialize::Materializer;
pub use request::{ConnectRequest, TokenExchangePolicy};
pub use tls::load_trusted_ca;
