//! Formica Core Prelude - convenient imports for common usage.
//!
//! ```rust
//! use formica_core::prelude::*;
//! ```

// Re-export commonly used types
pub use crate::types::{
    AgentId, CellPos, DeathCause, LifeState, Role, RoleCounts, Tick,
    MOBILE_LIFESPAN, PHEROMONE_MAX, QUEEN_LIFESPAN,
};

// Re-export agent state and capabilities
pub use crate::agent::{Mobile, Offensive, Vitals};

// Re-export the grid
pub use crate::grid::{Cell, Grid};

// Re-export observers
pub use crate::observer::{
    EventLog, GridEvent, GridObserver, NullObserver, RecordingObserver, TracingObserver,
};

// Re-export the random source
pub use crate::random::RandomSource;

// Re-export error types
pub use crate::error::{FormicaError, Result};
