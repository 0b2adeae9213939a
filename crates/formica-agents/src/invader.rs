//! Invader - a hostile raider ("bala") that attacks any colony member.
//!
//! Invaders ignore discovery: they roam to any adjacent cell.

use crate::combat::CombatResolver;
use crate::lifecycle::{self, Habitat};
use formica_core::prelude::*;

#[derive(Debug, Clone)]
pub struct Invader {
    vitals: Vitals,
}

impl Invader {
    pub fn new(id: AgentId, location: CellPos) -> Self {
        Self {
            vitals: Vitals::new(id, Role::Invader, location),
        }
    }

    /// One tick: attack a colony member on this cell, or roam.
    pub fn act(&mut self, hab: &mut Habitat<'_>) -> Result<LifeState> {
        if lifecycle::age(hab, &mut self.vitals)? == LifeState::Dead {
            return Ok(LifeState::Dead);
        }

        let here = self.location();
        if self.prey_present(&hab.grid[here]) {
            CombatResolver::engage(hab, &*self)?;
        } else {
            let to = *hab
                .rng
                .choose(hab.grid.adjacency(here), Some(self.id()), "invader roam")?;
            self.step_to(hab.grid, to);
        }
        Ok(LifeState::Alive)
    }
}

impl Mobile for Invader {
    fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    fn vitals_mut(&mut self) -> &mut Vitals {
        &mut self.vitals
    }
}

impl Offensive for Invader {
    fn is_prey(&self, role: Role) -> bool {
        role.is_colony_member()
    }

    fn prey_present(&self, cell: &Cell) -> bool {
        let counts = cell.counts();
        cell.has_queen() || counts.forager > 0 || counts.scout > 0 || counts.soldier > 0
    }
}
