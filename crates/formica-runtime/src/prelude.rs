//! Formica Runtime Prelude - convenient imports for common usage.
//!
//! ```rust
//! use formica_runtime::prelude::*;
//! ```

// Re-export the scheduler
pub use crate::colony::{
    CellSnapshot, CensusLine, Colony, ColonyEvent, ColonySnapshot, ColonyStats, TickPhase,
    TICK_PHASES,
};
pub use crate::controller::{ControlState, Controller, RunOutcome, StopHandle};

// Re-export configuration
pub use crate::clock::ColonyClock;
pub use crate::config::ColonyConfig;
pub use crate::preset::ColonyPreset;

// Re-export agents and core
pub use formica_agents::prelude::*;
