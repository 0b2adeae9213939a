//! Events emitted by agent behaviour during a tick.

use formica_core::types::*;
use serde::{Deserialize, Serialize};

/// Record of a completed death transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Death {
    pub id: AgentId,
    pub role: Role,
    /// Cell the agent died on.
    pub position: CellPos,
    /// Age at death, in ticks.
    pub age: u64,
    pub cause: DeathCause,
}

/// Something an agent did that the scheduler reports upward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentEvent {
    /// The queen hatched a new colony member.
    Hatched {
        id: AgentId,
        role: Role,
        position: CellPos,
    },
    Died(Death),
    /// An attack was resolved.
    Attacked {
        attacker: AgentId,
        target: AgentId,
        success: bool,
    },
    FoodPickedUp {
        forager: AgentId,
        position: CellPos,
    },
    /// A returning forager dropped its load on the queen's cell.
    FoodDelivered {
        forager: AgentId,
        position: CellPos,
    },
    /// A scout revealed a cell.
    Discovered {
        scout: AgentId,
        position: CellPos,
        food: u32,
    },
}
