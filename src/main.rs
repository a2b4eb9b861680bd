//! osc - Main entry point

use clap::Parser;
use log::debug;

use osc::{run_connect_command, run_list_command, Cli, Command};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    debug!("osc v{}", env!("CARGO_PKG_VERSION"));
    debug!("CLI args: {:?}", cli);

    let result = match &cli.command {
        Command::Connect(args) => run_connect_command(cli.config.as_deref(), args).await,
        Command::List => {
            run_list_command(cli.config.as_deref());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(e.exit_code());
    }
}
