//! Scout - wanders the whole grid and reveals what it finds.

use crate::event::AgentEvent;
use crate::lifecycle::{self, Habitat};
use formica_core::prelude::*;

/// Chance, in percent, that a newly revealed cell holds food.
pub const FOOD_CHANCE_PERCENT: u32 = 25;
/// Smallest food pile a scout can reveal.
pub const FOOD_MIN: u32 = 500;
/// Largest food pile a scout can reveal.
pub const FOOD_MAX: u32 = 1000;

#[derive(Debug, Clone)]
pub struct Scout {
    vitals: Vitals,
}

impl Scout {
    pub fn new(id: AgentId, location: CellPos) -> Self {
        Self {
            vitals: Vitals::new(id, Role::Scout, location),
        }
    }

    /// One tick of scout behaviour.
    ///
    /// Draws: destination index, then (only for an undiscovered
    /// destination) the food roll and the pile size.
    pub fn act(&mut self, hab: &mut Habitat<'_>) -> Result<LifeState> {
        if lifecycle::age(hab, &mut self.vitals)? == LifeState::Dead {
            return Ok(LifeState::Dead);
        }

        let here = self.location();
        let to = *hab
            .rng
            .choose(hab.grid.adjacency(here), Some(self.id()), "scout destination")?;

        if !hab.grid[to].is_discovered() {
            let food = if hab.rng.percent(FOOD_CHANCE_PERCENT) {
                FOOD_MIN + hab.rng.below(FOOD_MAX - FOOD_MIN + 1)
            } else {
                0
            };
            hab.grid.set_food(to, food)?;
            hab.grid.set_discovered(to, true)?;
            tracing::debug!(agent = %self.id(), cell = %to, food, "scout revealed cell");
            hab.events.push(AgentEvent::Discovered {
                scout: self.id(),
                position: to,
                food,
            });
        }

        self.step_to(hab.grid, to);
        Ok(LifeState::Alive)
    }
}

impl Mobile for Scout {
    fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    fn vitals_mut(&mut self) -> &mut Vitals {
        &mut self.vitals
    }
}
