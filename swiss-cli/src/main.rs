//! Swiss CLI - Command-line interface
//!
//! Commands:
//! - run: Simulate a full tournament from a roster file
//! - demo: Simulate the built-in eight-player tournament
//! - pair: Print the first-round pairings for a roster

mod pair_cmd;
mod render;
mod run_cmd;
mod simulate;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "swiss")]
#[command(about = "Swiss-system chess tournament pairing")]
struct Cli {
    /// Random seed for colours and simulated results
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log pairing decisions
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a tournament from a roster file until no pairing remains
    Run(run_cmd::RunArgs),
    /// Simulate the built-in eight-player tournament
    Demo(run_cmd::DemoArgs),
    /// Print first-round pairings for a roster
    Pair(pair_cmd::PairArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run(args) => run_cmd::run(args, cli.seed),
        Commands::Demo(args) => run_cmd::demo(args, cli.seed),
        Commands::Pair(args) => pair_cmd::run(args, cli.seed),
    }
}

/// Log to stderr so tables and JSON on stdout stay clean
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
