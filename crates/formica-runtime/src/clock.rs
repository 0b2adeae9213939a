//! Colony clock - elapsed turns expressed as days and turns.

use formica_core::types::Tick;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColonyClock {
    turns: Tick,
    turns_per_day: u64,
}

impl ColonyClock {
    /// A clock at turn zero. A zero day length is treated as one.
    pub fn new(turns_per_day: u64) -> Self {
        Self {
            turns: 0,
            turns_per_day: turns_per_day.max(1),
        }
    }

    pub fn advance(&mut self) {
        self.turns += 1;
    }

    pub fn turns(&self) -> Tick {
        self.turns
    }

    pub fn days(&self) -> u64 {
        self.turns / self.turns_per_day
    }

    /// Turns elapsed within the current day.
    pub fn turn_of_day(&self) -> u64 {
        self.turns % self.turns_per_day
    }
}

impl fmt::Display for ColonyClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} days, {} turns", self.days(), self.turn_of_day())
    }
}
