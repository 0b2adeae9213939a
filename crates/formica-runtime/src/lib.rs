//! # Formica Runtime
//!
//! Scheduling and run control for the colony.
//!
//! The [`Colony`](colony::Colony) owns the grid, every agent and the random
//! stream, and advances them one tick at a time through a fixed phase
//! order. The [`Controller`](controller::Controller) puts run/step/stop
//! control in front of it, the way an operator drives the simulation.

pub mod clock;
pub mod preset;
pub mod config;
pub mod colony;
pub mod controller;
pub mod prelude;
