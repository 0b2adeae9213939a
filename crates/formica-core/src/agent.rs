//! Agent - the state every ant carries, and the capabilities roles share.
//!
//! Roles form a closed set (see [`Role`]); behaviour is dispatched by
//! pattern matching in the scheduler. The two capability traits below
//! capture what several roles have in common:
//! - [`Mobile`]: ages on a one-year lifespan and walks between cells
//! - [`Offensive`]: a mobile role that attacks prey on its own cell

use crate::grid::{Cell, Grid};
use crate::types::*;
use serde::{Deserialize, Serialize};

/// Identity, age and location common to every agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vitals {
    pub id: AgentId,
    pub role: Role,
    pub age: u64,
    /// The single cell this agent occupies.
    pub location: CellPos,
}

impl Vitals {
    pub fn new(id: AgentId, role: Role, location: CellPos) -> Self {
        Self {
            id,
            role,
            age: 0,
            location,
        }
    }

    /// Advance age by one tick.
    ///
    /// Returns `Dead` exactly on the tick where age first reaches the role's
    /// lifespan; callers must run the death transition before anything else.
    pub fn grow_older(&mut self) -> LifeState {
        self.age += 1;
        if self.age >= self.role.lifespan() {
            LifeState::Dead
        } else {
            LifeState::Alive
        }
    }
}

/// A role that walks the grid.
pub trait Mobile {
    fn vitals(&self) -> &Vitals;

    fn vitals_mut(&mut self) -> &mut Vitals;

    fn id(&self) -> AgentId {
        self.vitals().id
    }

    fn location(&self) -> CellPos {
        self.vitals().location
    }

    /// Move to `to`, keeping the grid's counts and occupant sets in step.
    fn step_to(&mut self, grid: &mut Grid, to: CellPos) {
        let v = self.vitals();
        let (id, role, location) = (v.id, v.role, v.location);
        grid.relocate(location, to, id, role);
        self.vitals_mut().location = to;
    }
}

/// A mobile role that hunts other roles.
pub trait Offensive: Mobile {
    /// Whether an agent of `role` is eligible prey.
    fn is_prey(&self, role: Role) -> bool;

    /// Cheap presence check from the cell's tallies, before any selection.
    fn prey_present(&self, cell: &Cell) -> bool;
}
