//! Formica CLI - drive an ant colony simulation from the terminal.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::SpawnArg;

#[derive(Parser)]
#[command(name = "formica", long_about = None)]
#[command(author, version, about = "Formica - tick-driven ant colony simulation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (debug-level logging)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default formica.toml
    Init {
        /// Project directory (default: current directory)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Run the colony continuously
    Run {
        /// Stop after this many ticks (default: until the queen dies)
        #[arg(short, long)]
        ticks: Option<u64>,

        /// Seed for the random stream
        #[arg(short, long)]
        seed: Option<u64>,

        /// Milliseconds between ticks (overrides formica.toml)
        #[arg(short, long)]
        interval_ms: Option<u64>,

        /// Inject an agent before the first tick, e.g. "invader@0,0"
        #[arg(long = "spawn", value_name = "ROLE@ROW,COL")]
        spawns: Vec<SpawnArg>,

        /// Print the final snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Advance the colony tick by tick, reporting each one
    Step {
        /// Number of ticks to step
        #[arg(short, long, default_value = "1")]
        count: u64,

        /// Seed for the random stream
        #[arg(short, long)]
        seed: Option<u64>,

        /// Inject an agent before the first tick, e.g. "scout@14,14"
        #[arg(long = "spawn", value_name = "ROLE@ROW,COL")]
        spawns: Vec<SpawnArg>,

        /// Print the final snapshot as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::Config::load()?;

    // Initialize logging
    let log_level = if cli.verbose {
        "debug".to_string()
    } else {
        config.log.level.clone()
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Init { path } => commands::init::run(path),
        Commands::Run {
            ticks,
            seed,
            interval_ms,
            spawns,
            json,
        } => commands::run::run(config, ticks, seed, interval_ms, &spawns, json),
        Commands::Step {
            count,
            seed,
            spawns,
            json,
        } => commands::step::run(config, count, seed, &spawns, json),
    }
}
