//! Connect command arguments

use clap::Parser;

/// Arguments for the 'connect' command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
        osc connect prod\n  \
        osc connect staging --strict-token-exchange\n  \
        osc connect              # pick a profile interactively")]
pub struct ConnectArgs {
    /// Profile name from osc.config (prompted for when omitted on a terminal)
    pub profile: Option<String>,

    /// Fail when the backend answers the token request with a non-200 status
    /// instead of writing a session without tokens
    #[arg(long, default_value_t = false)]
    pub strict_token_exchange: bool,
}
