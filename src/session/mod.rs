//! sensuctl session files
//!
//! The cluster (session) and profile (display) documents that sensuctl reads,
//! written as a pair after a successful connect and read back by `list`.

mod commands;
mod models;
mod store;

pub use commands::{run_connect_command, run_list_command};
pub use models::{ActiveSession, DisplayDescriptor, SessionDescriptor, TokenResponse};
pub use store::SessionStore;
