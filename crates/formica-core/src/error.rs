//! Error types for Formica operations.
//!
//! Per-agent errors raised inside a tick phase are isolated by the scheduler;
//! they never abort the remaining agents of the phase.

use crate::types::{AgentId, CellPos, Role, Tick};
use thiserror::Error;

/// Result type for Formica operations.
pub type Result<T> = std::result::Result<T, FormicaError>;

/// Errors that can occur while building or advancing a colony.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormicaError {
    /// A role was passed to an operation that cannot handle it.
    #[error("Invalid role {role} for {operation}")]
    InvalidRole { role: Role, operation: String },

    /// A uniform random choice was requested over an empty set.
    #[error("No candidates for {context} (agent {agent:?})")]
    EmptyCandidates {
        agent: Option<AgentId>,
        context: &'static str,
    },

    /// A position outside the grid was addressed.
    #[error("Cell {pos} is outside the {rows}x{cols} grid")]
    OutOfBounds { pos: CellPos, rows: usize, cols: usize },

    /// An agent id that is not (or no longer) registered.
    #[error("Agent not found: {0}")]
    UnknownAgent(AgentId),

    /// The queen is dead; the simulation is over.
    #[error("Colony collapsed at tick {tick}: the queen has died")]
    ColonyCollapsed { tick: Tick },

    /// Invalid configuration value.
    #[error("Invalid value for {field}: {reason}")]
    Config { field: String, reason: String },
}

// Convenience constructors
impl FormicaError {
    pub fn invalid_role(role: Role, operation: impl Into<String>) -> Self {
        FormicaError::InvalidRole {
            role,
            operation: operation.into(),
        }
    }

    pub fn empty(agent: Option<AgentId>, context: &'static str) -> Self {
        FormicaError::EmptyCandidates { agent, context }
    }

    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        FormicaError::Config {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error ends the simulation.
    pub fn is_terminal(&self) -> bool {
        matches!(self, FormicaError::ColonyCollapsed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_descriptive() {
        let err = FormicaError::invalid_role(Role::Queen, "spawn_test");
        assert_eq!(err.to_string(), "Invalid role queen for spawn_test");

        let err = FormicaError::OutOfBounds {
            pos: CellPos::new(9, 2),
            rows: 5,
            cols: 5,
        };
        assert!(err.to_string().contains("9,2"));
    }

    #[test]
    fn only_collapse_is_terminal() {
        assert!(FormicaError::ColonyCollapsed { tick: 3 }.is_terminal());
        assert!(!FormicaError::empty(None, "prey").is_terminal());
    }
}
