//! Queen - eats, ages and hatches the colony.
//!
//! The queen never moves. Her death, by any cause, ends the simulation.

use crate::event::AgentEvent;
use crate::lifecycle::{self, Habitat};
use formica_core::prelude::*;

/// Ticks between hatches.
pub const HATCH_RATE: u64 = 10;

#[derive(Debug, Clone)]
pub struct Queen {
    vitals: Vitals,
}

impl Queen {
    pub fn new(id: AgentId, location: CellPos) -> Self {
        Self {
            vitals: Vitals::new(id, Role::Queen, location),
        }
    }

    pub fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    pub fn id(&self) -> AgentId {
        self.vitals.id
    }

    pub fn location(&self) -> CellPos {
        self.vitals.location
    }

    pub fn age(&self) -> u64 {
        self.vitals.age
    }

    /// Brood role for a roll in `[0, 100)`: 50% forager, 25% scout, 25% soldier.
    pub fn brood_role(roll: u32) -> Role {
        match roll {
            0..=49 => Role::Forager,
            50..=74 => Role::Scout,
            _ => Role::Soldier,
        }
    }

    /// One tick: age, eat one unit of food, and hatch on schedule.
    ///
    /// The brood roll is drawn every tick she eats, hatching or not.
    pub fn act(&mut self, hab: &mut Habitat<'_>) -> Result<LifeState> {
        if lifecycle::age(hab, &mut self.vitals)? == LifeState::Dead {
            return Ok(LifeState::Dead);
        }

        let here = self.location();
        let food = hab.grid[here].food();
        if food == 0 {
            lifecycle::bury(hab, &self.vitals, DeathCause::Starvation)?;
            return Ok(LifeState::Dead);
        }
        hab.grid.set_food(here, food - 1)?;

        let roll = hab.rng.below(100);
        if self.vitals.age % HATCH_RATE == 0 {
            let role = Self::brood_role(roll);
            let id = hab.registry.create(hab.grid, role, here)?;
            tracing::debug!(agent = %id, %role, cell = %here, "queen hatched");
            hab.events.push(AgentEvent::Hatched {
                id,
                role,
                position: here,
            });
        }
        Ok(LifeState::Alive)
    }
}
