//! CLI command definitions for the `chatrelay` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod check;
pub mod run;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use chatrelay_observe::LogOptions;

/// Relay @mentions in Telegram group chats to an OpenAI-compatible model.
#[derive(Parser)]
#[command(name = "chatrelay", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the bot and poll Telegram until interrupted.
    Run {
        #[command(flatten)]
        config: ConfigArgs,

        /// Export spans to stdout via OpenTelemetry.
        #[arg(long)]
        otel: bool,
    },

    /// Verify configuration and send one test completion.
    Check {
        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Path to config.toml (defaults to ~/.chatrelay/config.toml).
    #[arg(long, env = "CHATRELAY_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn log_options(&self) -> LogOptions {
        LogOptions {
            verbosity: self.verbose,
            quiet: self.quiet,
            json: self.json_logs,
            otel: matches!(self.command, Commands::Run { otel: true, .. }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        <Cli as clap::CommandFactory>::command().debug_assert();
    }

    #[test]
    fn test_run_flags() {
        let cli = Cli::try_parse_from([
            "chatrelay", "-v", "--json-logs", "run", "--config", "/tmp/c.toml", "--otel",
        ])
        .unwrap();
        let options = cli.log_options();
        assert_eq!(options.verbosity, 1);
        assert!(options.json);
        assert!(options.otel);
        match cli.command {
            Commands::Run { config, otel } => {
                assert!(otel);
                assert_eq!(config.config, Some(PathBuf::from("/tmp/c.toml")));
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_check_never_enables_otel() {
        let cli = Cli::try_parse_from(["chatrelay", "check", "--quiet"]).unwrap();
        let options = cli.log_options();
        assert!(options.quiet);
        assert!(!options.otel);
    }
}
