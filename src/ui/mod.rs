//! UI utilities for terminal output

mod select;
mod spinner;

pub use select::select_profile;
pub use spinner::{create_spinner, finish_spinner};
