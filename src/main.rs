//! Token Ledger CLI Application
//!
//! A command-line interface for exercising the ownership ledger.

use clap::{Parser, Subcommand};
use token_ledger::cli::{self, Backend};
use token_ledger::ledger::LedgerConfig;
use token_ledger::token::DEFAULT_MAX_ID_ATTEMPTS;

#[derive(Parser)]
#[command(name = "ledger")]
#[command(version = "0.1.0")]
#[command(about = "A minimal non-fungible token ownership ledger", long_about = None)]
struct Cli {
    /// Maximum token id draws per mint before giving up
    #[arg(long, default_value_t = DEFAULT_MAX_ID_ATTEMPTS)]
    max_id_attempts: u32,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register holders, mint, transfer and list tokens
    Demo {
        /// Ledger implementation to run against
        #[arg(short, long, value_enum, default_value = "memory")]
        backend: Backend,

        /// Print tokens as JSON
        #[arg(long)]
        json: bool,
    },

    /// Mint concurrently from several threads and check for duplicates
    Stress {
        /// Number of worker threads
        #[arg(short, long, default_value = "8")]
        threads: usize,

        /// Tokens minted by each thread
        #[arg(short, long, default_value = "1000")]
        mints: usize,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = LedgerConfig::default().with_max_id_attempts(cli.max_id_attempts);

    match cli.command {
        Commands::Demo { backend, json } => {
            cli::cmd_demo(backend, config, json)?;
        }

        Commands::Stress { threads, mints } => {
            let report = cli::cmd_stress(config, threads, mints)?;
            if !report.is_consistent() {
                return Err("concurrent mint produced an inconsistent ledger".into());
            }
        }
    }

    Ok(())
}
