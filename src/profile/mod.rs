//! Profile store
//!
//! Named connection profiles for Sensu backends, loaded read-only from the
//! `osc.config` YAML file.

mod models;
mod store;

pub use models::{parse_duration, Profile};
pub use store::ProfileStore;
