//! CLI argument parsing

mod connect;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{defaults, profiles};

pub use connect::ConnectArgs;

/// Manage configured sensuctl clusters
#[derive(Parser, Debug)]
#[command(name = "osc")]
#[command(version)]
#[command(about = "Manage configured sensuctl clusters")]
#[command(
    long_about = "OSC (Operate Sensu Cluster) lets Sensu administrators switch sensuctl \
                  between clusters using named profile configurations."
)]
pub struct Cli {
    /// Profile store file (default: osc.config[.yaml|.yml] in ., ~ or ~/.config)
    #[arg(short, long, global = true, env = profiles::ENV_VAR)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, global = true, default_value = defaults::LOG_LEVEL)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Connect sensuctl to a configured Sensu cluster
    Connect(ConnectArgs),

    /// List config profiles, along with active sensuctl settings
    #[command(visible_alias = "ls")]
    List,
}
