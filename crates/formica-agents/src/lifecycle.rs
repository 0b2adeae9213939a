//! Lifecycle - aging and the death transition.
//!
//! Every agent runs [`age`] first in its turn. When the lifespan is reached
//! the agent is buried before it does anything else: its cell tallies and
//! occupant set are updated, role extras are applied, and the registry
//! forgets it, all in one step.

use crate::event::{AgentEvent, Death};
use crate::registry::AgentRegistry;
use formica_core::prelude::*;

/// Mutable world handed to an agent for the duration of its turn.
pub struct Habitat<'a> {
    pub grid: &'a mut Grid,
    pub registry: &'a mut AgentRegistry,
    pub rng: &'a mut RandomSource,
    pub events: &'a mut Vec<AgentEvent>,
}

impl<'a> Habitat<'a> {
    pub fn new(
        grid: &'a mut Grid,
        registry: &'a mut AgentRegistry,
        rng: &'a mut RandomSource,
        events: &'a mut Vec<AgentEvent>,
    ) -> Self {
        Self {
            grid,
            registry,
            rng,
            events,
        }
    }
}

/// Advance `vitals` by one tick, burying the agent if its time is up.
pub fn age(hab: &mut Habitat<'_>, vitals: &mut Vitals) -> Result<LifeState> {
    let state = vitals.grow_older();
    if state == LifeState::Dead {
        bury(hab, vitals, DeathCause::OldAge)?;
    }
    Ok(state)
}

/// Run the death transition for an agent whose state the caller holds.
pub fn bury(hab: &mut Habitat<'_>, vitals: &Vitals, cause: DeathCause) -> Result<Death> {
    let pos = vitals.location;
    hab.grid.check(pos)?;
    hab.grid.depart(pos, vitals.id, vitals.role);

    // A dying forager leaves a unit of food behind.
    if vitals.role == Role::Forager {
        let food = hab.grid[pos].food().saturating_add(1);
        hab.grid.set_food(pos, food)?;
    }

    hab.registry.forget(vitals.id);

    let death = Death {
        id: vitals.id,
        role: vitals.role,
        position: pos,
        age: vitals.age,
        cause,
    };
    if vitals.role == Role::Queen {
        tracing::info!(agent = %vitals.id, cell = %pos, %cause, "queen died");
    } else {
        tracing::debug!(agent = %vitals.id, role = %vitals.role, cell = %pos, %cause, "agent died");
    }
    hab.events.push(AgentEvent::Died(death));
    Ok(death)
}

/// Run the death transition for an agent still held by the registry.
pub fn kill(hab: &mut Habitat<'_>, target: AgentId, cause: DeathCause) -> Result<Death> {
    let vitals = hab
        .registry
        .vitals(target)
        .cloned()
        .ok_or(FormicaError::UnknownAgent(target))?;
    bury(hab, &vitals, cause)
}
