//! chatrelay entry point.
//!
//! Binary name: `chatrelay`
//!
//! Parses CLI arguments, initializes tracing, then dispatches to the
//! command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use chatrelay_observe::{init_tracing, shutdown_tracing};
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need tracing or configuration
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "chatrelay", &mut std::io::stdout());
        return Ok(());
    }

    init_tracing(&cli.log_options())
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = match cli.command {
        Commands::Run { config, .. } => match state::AppState::init(config.config.as_deref()).await {
            Ok(state) => cli::run::run(state).await,
            Err(e) => Err(e),
        },
        Commands::Check { config } => cli::check::check(config.config.as_deref()).await,
        Commands::Completions { .. } => Ok(()),
    };

    shutdown_tracing();
    result
}
