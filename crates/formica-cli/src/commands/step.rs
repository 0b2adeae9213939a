//! Advance the colony one tick at a time.

use anyhow::Result;
use colored::Colorize;
use formica::prelude::*;

use super::report;
use super::SpawnArg;
use crate::config::Config;

pub fn run(
    config: Config,
    count: u64,
    seed: Option<u64>,
    spawns: &[SpawnArg],
    json: bool,
) -> Result<()> {
    let mut controller = super::prepare(config.colony, seed, spawns)?;

    for _ in 0..count {
        let events = controller.step()?;
        if let Some(colony) = controller.colony() {
            if !json {
                println!("{}", report::tick_line(colony, &events));
            }
        }
        if controller.state() == ControlState::Halted {
            println!("{} The queen has died - colony collapsed", "✗".red().bold());
            break;
        }
    }

    if let Some(colony) = controller.colony() {
        if json {
            report::print_json(colony)?;
        } else {
            println!();
            report::print_stats(colony);
        }
    }
    Ok(())
}
