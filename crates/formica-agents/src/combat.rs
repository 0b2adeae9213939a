//! CombatResolver - prey selection and attack resolution.
//!
//! Used by soldiers and invaders alike. An attack first picks one eligible
//! occupant of the attacker's cell uniformly at random, then succeeds on a
//! coin flip; a successful attack runs the target's death transition
//! immediately.

use crate::event::{AgentEvent, Death};
use crate::lifecycle::{self, Habitat};
use crate::registry::AgentRegistry;
use formica_core::prelude::*;

/// Outcome of a resolved attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strike {
    Hit(Death),
    Miss { target: AgentId },
}

pub struct CombatResolver;

impl CombatResolver {
    /// Occupants of `pos` the attacker may target, in arrival order.
    pub fn eligible_prey<A: Offensive>(
        grid: &Grid,
        registry: &AgentRegistry,
        attacker: &A,
        pos: CellPos,
    ) -> Vec<AgentId> {
        grid[pos]
            .occupants()
            .iter()
            .copied()
            .filter(|&id| id != attacker.id())
            .filter(|&id| registry.role_of(id).is_some_and(|r| attacker.is_prey(r)))
            .collect()
    }

    /// Pick one target uniformly at random.
    ///
    /// An empty list is a broken precondition (the presence check said prey
    /// was here) and fails with `EmptyCandidates` without drawing.
    pub fn select_prey(
        rng: &mut RandomSource,
        attacker: AgentId,
        prey: &[AgentId],
    ) -> Result<AgentId> {
        rng.choose(prey, Some(attacker), "prey selection").copied()
    }

    /// Resolve one attack on `target` with even odds.
    pub fn strike(hab: &mut Habitat<'_>, attacker: AgentId, target: AgentId) -> Result<Strike> {
        let success = hab.rng.below(2) == 0;
        hab.events.push(AgentEvent::Attacked {
            attacker,
            target,
            success,
        });
        if !success {
            return Ok(Strike::Miss { target });
        }
        let death = lifecycle::kill(hab, target, DeathCause::Combat { attacker })?;
        Ok(Strike::Hit(death))
    }

    /// Select prey on the attacker's cell and strike it.
    pub fn engage<A: Offensive>(hab: &mut Habitat<'_>, attacker: &A) -> Result<Strike> {
        let prey = Self::eligible_prey(hab.grid, hab.registry, attacker, attacker.location());
        let target = Self::select_prey(hab.rng, attacker.id(), &prey)?;
        Self::strike(hab, attacker.id(), target)
    }
}
