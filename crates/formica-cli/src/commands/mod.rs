//! CLI command implementations.

pub mod init;
pub mod run;
pub mod step;
pub mod report;

use anyhow::{Context, Result};
use formica::prelude::*;
use std::str::FromStr;

/// A debug injection given on the command line as `ROLE@ROW,COL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnArg {
    pub role: Role,
    pub pos: CellPos,
}

impl FromStr for SpawnArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (role, pos) = s
            .split_once('@')
            .ok_or_else(|| format!("expected ROLE@ROW,COL, got {:?}", s))?;
        let (row, col) = pos
            .split_once(',')
            .ok_or_else(|| format!("expected ROW,COL, got {:?}", pos))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<usize>()
                .map_err(|e| format!("bad coordinate {:?}: {}", v, e))
        };
        Ok(SpawnArg {
            role: role.trim().parse()?,
            pos: CellPos::new(parse(row)?, parse(col)?),
        })
    }
}

/// Build a controller from config plus command-line overrides, with the
/// requested agents injected.
pub fn prepare(
    mut config: ColonyConfig,
    seed: Option<u64>,
    spawns: &[SpawnArg],
) -> Result<Controller> {
    if seed.is_some() {
        config.seed = seed;
    }
    let (rows, cols, preset) = (config.rows, config.cols, config.preset.clone());
    let mut controller = Controller::new(config);
    controller
        .initialize(rows, cols, preset, Box::new(TracingObserver))
        .context("Failed to initialize colony")?;

    for arg in spawns {
        controller
            .spawn_test(arg.role, arg.pos)
            .with_context(|| format!("Failed to spawn {} at {}", arg.role, arg.pos))?;
    }
    Ok(controller)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_spawn_args() {
        let arg: SpawnArg = "bala@0,0".parse().unwrap();
        assert_eq!(arg.role, Role::Invader);
        assert_eq!(arg.pos, CellPos::origin());

        let arg: SpawnArg = "Scout@14, 14".parse().unwrap();
        assert_eq!(arg, SpawnArg { role: Role::Scout, pos: CellPos::new(14, 14) });
    }

    #[test]
    fn rejects_malformed_spawn_args() {
        assert!("scout".parse::<SpawnArg>().is_err());
        assert!("scout@3".parse::<SpawnArg>().is_err());
        assert!("drone@1,1".parse::<SpawnArg>().is_err());
        assert!("scout@x,1".parse::<SpawnArg>().is_err());
    }

    #[test]
    fn prepare_rejects_queen_spawn() {
        let config = ColonyConfig {
            rows: 5,
            cols: 5,
            ..ColonyConfig::default()
        };
        let spawns = [SpawnArg { role: Role::Queen, pos: CellPos::origin() }];
        let err = prepare(config, Some(1), &spawns).unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid role queen"));
    }
}
