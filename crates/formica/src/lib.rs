//! # Formica
//!
//! An ant colony simulated on a rectangular grid, one tick at a time.
//!
//! A queen sits at the colony entrance, eats one unit of food per tick and
//! hatches a new ant every tenth tick. Scouts reveal unexplored cells and
//! sometimes find food there. Foragers carry food home along pheromone
//! trails they lay on the way back. Soldiers hunt the invaders that wander
//! in from the grid edge, and invaders hunt everything else. The run ends
//! when the queen dies.
//!
//! ## Quick Start
//!
//! ```rust
//! use formica::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let config = ColonyConfig {
//!     rows: 15,
//!     cols: 15,
//!     seed: Some(42),
//!     ..ColonyConfig::default()
//! };
//! let mut colony = Colony::from_config(config)?;
//!
//! for _ in 0..20 {
//!     if colony.is_collapsed() {
//!         break;
//!     }
//!     colony.tick()?;
//! }
//!
//! let stats = colony.stats();
//! println!("{} after {} ticks", stats.clock, stats.tick);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`formica_core`] - grid, cells, pheromone, random source and shared types
//! - [`formica_agents`] - the five roles, the registry and combat
//! - [`formica_runtime`] - tick scheduler, clock, presets and run control
//!
//! ## Tick order
//!
//! | Phase | What happens |
//! |-------|--------------|
//! | Refresh | neighbour caches rebuilt, every cell's pheromone halved |
//! | Scouts | move to a neighbour and reveal it |
//! | Foragers | follow trails out, retrace steps home |
//! | Soldiers | fight invaders or patrol |
//! | Invaders | fight colony members or roam, then a new invader may arrive |
//! | Queen | age, eat or starve, maybe hatch |

pub use formica_agents as agents;
pub use formica_core as core;
pub use formica_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust
/// use formica::prelude::*;
/// ```
pub mod prelude {
    pub use formica_runtime::prelude::*;
}
