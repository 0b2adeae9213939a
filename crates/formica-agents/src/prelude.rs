//! Formica Agents Prelude - convenient imports for common usage.
//!
//! ```rust
//! use formica_agents::prelude::*;
//! ```

// Re-export agent types
pub use crate::queen::{Queen, HATCH_RATE};
pub use crate::forager::{Forager, RecentMoves, PHEROMONE_DEPOSIT};
pub use crate::scout::Scout;
pub use crate::soldier::Soldier;
pub use crate::invader::Invader;

// Re-export shared machinery
pub use crate::registry::{AgentRegistry, Member};
pub use crate::lifecycle::Habitat;
pub use crate::combat::{CombatResolver, Strike};
pub use crate::event::{AgentEvent, Death};

// Re-export from core
pub use formica_core::prelude::*;
