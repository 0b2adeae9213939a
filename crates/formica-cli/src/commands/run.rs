//! Run the colony continuously.

use anyhow::Result;
use colored::Colorize;
use formica::prelude::*;
use indicatif::{ProgressBar, ProgressStyle};

use super::report;
use super::SpawnArg;
use crate::config::Config;

pub fn run(
    mut config: Config,
    ticks: Option<u64>,
    seed: Option<u64>,
    interval_ms: Option<u64>,
    spawns: &[SpawnArg],
    json: bool,
) -> Result<()> {
    if let Some(ms) = interval_ms {
        config.colony.tick_interval_ms = ms;
    }
    let mut controller = super::prepare(config.colony, seed, spawns)?;

    match ticks {
        Some(n) => println!("{} Running {} ticks...", "→".blue(), n.to_string().cyan()),
        None => println!("{} Running until the queen dies...", "→".blue()),
    }

    let pb = match ticks {
        Some(n) => {
            let pb = ProgressBar::new(n);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ticks {msg}")?
                    .progress_chars("#>-"),
            );
            pb
        }
        None => {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner().template("{spinner:.green} {pos} ticks {msg}")?,
            );
            pb
        }
    };

    let outcome = controller.run(ticks, |colony, events| {
        pb.set_message(colony.clock().to_string());
        if tracing::enabled!(tracing::Level::DEBUG) {
            pb.println(report::tick_line(colony, events));
        }
        pb.inc(1);
    })?;
    pb.finish_and_clear();

    match outcome {
        RunOutcome::Completed { ticks } => {
            println!("{} Completed {} ticks", "✓".green().bold(), ticks)
        }
        RunOutcome::Stopped { ticks } => {
            println!("{} Stopped after {} ticks", "•".yellow(), ticks)
        }
        RunOutcome::Collapsed { ticks } => println!(
            "{} The queen has died after {} ticks - colony collapsed",
            "✗".red().bold(),
            ticks
        ),
    }
    println!();

    if let Some(colony) = controller.colony() {
        if json {
            report::print_json(colony)?;
        } else {
            report::print_stats(colony);
        }
    }
    Ok(())
}
