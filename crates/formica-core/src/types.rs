//! Shared types used across all Formica crates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Monotonic simulation tick counter.
pub type Tick = u64;

/// Maximum pheromone level a cell can hold.
pub const PHEROMONE_MAX: u32 = 1000;

/// Lifespan of the queen in ticks: twenty years at ten turns per day.
pub const QUEEN_LIFESPAN: u64 = 73_000;

/// Lifespan of every mobile role in ticks: one year.
pub const MOBILE_LIFESPAN: u64 = 3_650;

/// Unique identifier for an agent in the colony.
///
/// Identifiers are assigned sequentially by the registry and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AgentId(pub u64);

impl AgentId {
    /// Create an identifier from a raw value (deterministic, for testing).
    pub fn from_seed(seed: u64) -> Self {
        Self(seed)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ant-{}", self.0)
    }
}

/// The role an agent plays in (or against) the colony.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    Queen,
    Forager,
    Scout,
    Soldier,
    /// Hostile raider ("bala") that hunts colony members.
    Invader,
}

impl Role {
    /// All roles, in declaration order.
    pub const ALL: [Role; 5] = [
        Role::Queen,
        Role::Forager,
        Role::Scout,
        Role::Soldier,
        Role::Invader,
    ];

    /// Roles that move around the grid and are tallied in cell counts.
    pub const MOBILE: [Role; 4] = [Role::Forager, Role::Scout, Role::Soldier, Role::Invader];

    /// Maximum lifespan in ticks.
    pub fn lifespan(&self) -> u64 {
        match self {
            Role::Queen => QUEEN_LIFESPAN,
            _ => MOBILE_LIFESPAN,
        }
    }

    pub fn is_mobile(&self) -> bool {
        !matches!(self, Role::Queen)
    }

    /// Whether this role belongs to the colony (everything but invaders).
    pub fn is_colony_member(&self) -> bool {
        !matches!(self, Role::Invader)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Role::Queen => "queen",
            Role::Forager => "forager",
            Role::Scout => "scout",
            Role::Soldier => "soldier",
            Role::Invader => "invader",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "queen" => Ok(Role::Queen),
            "forager" => Ok(Role::Forager),
            "scout" => Ok(Role::Scout),
            "soldier" => Ok(Role::Soldier),
            "invader" | "bala" => Ok(Role::Invader),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// A grid position, addressed by row and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The grid origin, where invaders enter.
    pub fn origin() -> Self {
        Self { row: 0, col: 0 }
    }
}

impl fmt::Display for CellPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

/// Per-role population tallies for one cell.
///
/// The queen is tracked by a presence flag on the cell, not here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCounts {
    pub forager: u32,
    pub scout: u32,
    pub soldier: u32,
    pub invader: u32,
}

impl RoleCounts {
    /// Count for a mobile role. The queen always reads as zero.
    pub fn get(&self, role: Role) -> u32 {
        match role {
            Role::Forager => self.forager,
            Role::Scout => self.scout,
            Role::Soldier => self.soldier,
            Role::Invader => self.invader,
            Role::Queen => 0,
        }
    }

    pub(crate) fn slot_mut(&mut self, role: Role) -> Option<&mut u32> {
        match role {
            Role::Forager => Some(&mut self.forager),
            Role::Scout => Some(&mut self.scout),
            Role::Soldier => Some(&mut self.soldier),
            Role::Invader => Some(&mut self.invader),
            Role::Queen => None,
        }
    }

    pub fn total(&self) -> u32 {
        self.forager + self.scout + self.soldier + self.invader
    }
}

/// Why an agent died.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Reached the role's maximum lifespan.
    OldAge,
    /// The queen found no food on her cell.
    Starvation,
    /// Killed by an attacker.
    Combat { attacker: AgentId },
}

impl fmt::Display for DeathCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeathCause::OldAge => write!(f, "old age"),
            DeathCause::Starvation => write!(f, "starvation"),
            DeathCause::Combat { attacker } => write!(f, "killed by {}", attacker),
        }
    }
}

/// Lifecycle state shared by every agent. One-way: `Alive -> Dead`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeState {
    Alive,
    Dead,
}
