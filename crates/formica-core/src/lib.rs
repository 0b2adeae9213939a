//! # Formica Core
//!
//! Core types for a tick-driven ant colony simulation:
//!
//! - **Grid** - an R×C arena of cells holding counts, food, pheromone and
//!   discovery state; every mutation notifies an observer
//! - **RandomSource** - the one sequential random stream every decision draws from
//! - **Vitals / Mobile / Offensive** - agent state and shared role capabilities
//! - **FormicaError** - the error taxonomy shared by all crates
//!
//! ## Quick Start
//!
//! ```rust
//! use formica_core::prelude::*;
//!
//! let mut grid = Grid::headless(5, 5).unwrap();
//! let home = CellPos::new(2, 2);
//! grid.reveal_neighborhood(home).unwrap();
//! grid.refresh();
//! assert_eq!(grid.discovered_neighbors(home).len(), 8);
//!
//! let mut rng = RandomSource::seeded(42);
//! assert!(rng.below(10) < 10);
//! ```

pub mod types;
pub mod agent;
pub mod grid;
pub mod observer;
pub mod random;
pub mod error;
pub mod prelude;
