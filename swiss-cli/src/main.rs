//! Swiss CLI - Command-line interface
//!
//! Commands:
//! - pair: Pair the next round from a round input file
//! - simulate: Play a whole tournament with random results

mod pair_cmd;
mod simulate_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "swiss")]
#[command(about = "Swiss-system tournament pairing")]
struct Cli {
    /// Log debug details (candidate graph, solver choice)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pair the next round
    Pair(pair_cmd::PairArgs),
    /// Simulate a tournament with random results
    Simulate(simulate_cmd::SimulateArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Pair(args) => pair_cmd::run(args),
        Commands::Simulate(args) => simulate_cmd::run(args),
    }
}
