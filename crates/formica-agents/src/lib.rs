//! # Formica Agents
//!
//! The five roles of the colony and the machinery they share.
//!
//! - **Queen** - eats, ages and hatches new members every ten ticks
//! - **Forager** - follows pheromone trails to food and carries it home
//! - **Scout** - reveals the grid and the food lying in it
//! - **Soldier** - hunts invaders ([`Offensive`](formica_core::agent::Offensive))
//! - **Invader** - the hostile "bala" that attacks any colony member
//!
//! Agents live in an [`AgentRegistry`](registry::AgentRegistry) and act
//! against a [`Habitat`](lifecycle::Habitat): the grid, the registry, the
//! shared random stream and an event sink, borrowed for one turn.

pub mod event;
pub mod registry;
pub mod lifecycle;
pub mod combat;
pub mod queen;
pub mod forager;
pub mod scout;
pub mod soldier;
pub mod invader;
pub mod prelude;
