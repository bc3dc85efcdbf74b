//! sessionbars CLI - Normalize vendor minute payloads into session bars.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use sessionbars_lib::prelude::*;
use std::path::PathBuf;

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "sessionbars")]
#[command(about = "Normalize vendor minute payloads into session bars", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (errors only, no summary)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Data directory. Defaults to the platform data directory.
    #[arg(long, env = "SESSIONBARS_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize pending records of a market
    Run {
        /// Market identifier (e.g., NASDAQ)
        #[arg(short, long)]
        market: String,

        /// Only process records of this code
        #[arg(short, long)]
        code: Option<String>,
    },

    /// Return terminal records to pending
    Reset {
        /// Market identifier
        #[arg(short, long)]
        market: String,

        /// Only reset records of this code
        #[arg(short, long)]
        code: Option<String>,

        /// Statuses to reset (repeatable). Defaults to every failure status.
        #[arg(short, long = "status", value_name = "STATUS")]
        statuses: Vec<RecordStatus>,
    },

    /// Count records of a market by status
    Status {
        /// Market identifier
        #[arg(short, long)]
        market: String,

        /// Only count records of this code
        #[arg(short, long)]
        code: Option<String>,
    },

    /// List configured markets
    Markets,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let data_dir = DataDir::resolve(cli.data_dir);
    tracing::debug!(data_dir = %data_dir.root().display(), "Resolved data directory");

    match command {
        Commands::Run { market, code } => {
            commands::run::run(&data_dir, &selection(market, code), cli.quiet)
        }
        Commands::Reset {
            market,
            code,
            statuses,
        } => commands::reset::reset(&data_dir, &selection(market, code), &statuses, cli.quiet),
        Commands::Status { market, code } => {
            commands::status::status(&data_dir, &selection(market, code))
        }
        Commands::Markets => commands::markets::list_markets(&data_dir),
    }
}

fn selection(market: String, code: Option<String>) -> Selection {
    let selection = Selection::market(market);
    match code {
        Some(code) => selection.with_code(code),
        None => selection,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_data_dir_reads_environment() {
        let command = Cli::command();
        let data_dir = command
            .get_arguments()
            .find(|arg| arg.get_id() == "data_dir")
            .unwrap();
        assert_eq!(
            data_dir.get_env(),
            Some(std::ffi::OsStr::new("SESSIONBARS_DATA_DIR"))
        );
    }

    #[test]
    fn test_data_dir_flag() {
        let cli = Cli::try_parse_from(["sessionbars", "--data-dir", "/tmp/bars", "markets"]).unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/bars")));
        assert!(matches!(cli.command, Some(Commands::Markets)));
    }
}
