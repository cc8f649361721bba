use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "profitwatch",
    about = "Watch portfolio prices and alert once per crossed profit target"
)]
pub struct Cli {
    /// Portfolio JSON file (overrides PROFITWATCH_PORTFOLIO)
    #[arg(long, global = true)]
    pub portfolio: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Monitor continuously until interrupted
    Run {
        /// Seconds between checks (overrides PROFITWATCH_CHECK_INTERVAL_SECS)
        #[arg(long)]
        interval: Option<u64>,
    },
    /// Run a single check cycle and print the report
    Check,
    /// Fetch and print current prices
    Prices,
    /// Validate the portfolio file
    Validate,
}
