//! OSC - Operate Sensu Cluster
//!
//! Keeps named connection profiles for Sensu backends and switches sensuctl
//! between them.
//!
//! # Features
//!
//! - Profiles declared once in `osc.config.yaml`
//! - Credential check and token exchange against the backend API
//! - sensuctl's cluster and profile files written as a pair
//! - Listing of all profiles next to the active sensuctl session
//!
//! # Example
//!
//! ```bash
//! # Point sensuctl at the "prod" profile
//! osc connect prod
//!
//! # Show the active session and all profiles
//! osc list
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod profile;
pub mod sensu;
pub mod session;
pub mod ui;

pub use cli::{Cli, Command, ConnectArgs};
pub use error::{OscError, Result};
pub use profile::{Profile, ProfileStore};
pub use sensu::{AuthClient, ConnectRequest, Materializer, TokenExchangePolicy};
pub use session::{
    run_connect_command, run_list_command, ActiveSession, DisplayDescriptor, SessionDescriptor,
    SessionStore,
};
