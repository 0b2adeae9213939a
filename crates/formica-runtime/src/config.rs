//! Colony configuration.

use crate::preset::ColonyPreset;
use formica_core::prelude::*;
use serde::{Deserialize, Serialize};

/// Tunable parameters of a colony run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColonyConfig {
    /// Grid rows (default: 27).
    pub rows: usize,
    /// Grid columns (default: 27).
    pub cols: usize,
    /// Seed for the random stream; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Per-tick chance, in percent, that an invader arrives (default: 3).
    pub invader_spawn_percent: u32,
    /// Turns that make up one day on the colony clock (default: 10).
    pub turns_per_day: u64,
    /// Delay between ticks when running continuously (default: 1000).
    pub tick_interval_ms: u64,
    /// Cell where invaders arrive (default: the origin).
    pub invader_entry: CellPos,
    pub preset: ColonyPreset,
}

impl Default for ColonyConfig {
    fn default() -> Self {
        Self {
            rows: 27,
            cols: 27,
            seed: None,
            invader_spawn_percent: 3,
            turns_per_day: 10,
            tick_interval_ms: 1000,
            invader_entry: CellPos::origin(),
            preset: ColonyPreset::standard(),
        }
    }
}

impl ColonyConfig {
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(FormicaError::invalid_config(
                "rows/cols",
                format!("grid must be at least 1x1, got {}x{}", self.rows, self.cols),
            ));
        }
        if self.invader_spawn_percent > 100 {
            return Err(FormicaError::invalid_config(
                "invader_spawn_percent",
                format!("{} is not a percentage", self.invader_spawn_percent),
            ));
        }
        if self.turns_per_day == 0 {
            return Err(FormicaError::invalid_config("turns_per_day", "must be positive"));
        }
        let entry = self.invader_entry;
        if entry.row >= self.rows || entry.col >= self.cols {
            return Err(FormicaError::invalid_config(
                "invader_entry",
                format!("{} is outside the {}x{} grid", entry, self.rows, self.cols),
            ));
        }
        self.preset.validate(self.rows, self.cols)
    }
}
