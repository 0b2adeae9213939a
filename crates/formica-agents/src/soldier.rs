//! Soldier - hunts invaders across discovered territory.

use crate::combat::CombatResolver;
use crate::lifecycle::{self, Habitat};
use formica_core::prelude::*;

#[derive(Debug, Clone)]
pub struct Soldier {
    vitals: Vitals,
}

impl Soldier {
    pub fn new(id: AgentId, location: CellPos) -> Self {
        Self {
            vitals: Vitals::new(id, Role::Soldier, location),
        }
    }

    /// One tick: attack an invader on this cell, or patrol.
    pub fn act(&mut self, hab: &mut Habitat<'_>) -> Result<LifeState> {
        if lifecycle::age(hab, &mut self.vitals)? == LifeState::Dead {
            return Ok(LifeState::Dead);
        }

        let here = self.location();
        if self.prey_present(&hab.grid[here]) {
            CombatResolver::engage(hab, &*self)?;
        } else {
            let to = self.patrol_target(hab.grid, hab.rng)?;
            self.step_to(hab.grid, to);
        }
        Ok(LifeState::Alive)
    }

    /// A discovered neighbour holding an invader if there is one, else any
    /// discovered neighbour.
    pub fn patrol_target(&self, grid: &Grid, rng: &mut RandomSource) -> Result<CellPos> {
        let neighbors = grid.discovered_neighbors(self.location());
        let hot: Vec<CellPos> = neighbors
            .iter()
            .copied()
            .filter(|&n| self.prey_present(&grid[n]))
            .collect();
        if hot.is_empty() {
            rng.choose(neighbors, Some(self.id()), "soldier patrol").copied()
        } else {
            rng.choose(&hot, Some(self.id()), "soldier pursuit").copied()
        }
    }
}

impl Mobile for Soldier {
    fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    fn vitals_mut(&mut self) -> &mut Vitals {
        &mut self.vitals
    }
}

impl Offensive for Soldier {
    fn is_prey(&self, role: Role) -> bool {
        role == Role::Invader
    }

    fn prey_present(&self, cell: &Cell) -> bool {
        cell.count(Role::Invader) > 0
    }
}
