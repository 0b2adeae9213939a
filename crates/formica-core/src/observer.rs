//! Observer - push notifications from the grid to an external view.
//!
//! The core never queries the observer. Every cell setter emits exactly one
//! notification, in mutation order, so a view that replays them stays
//! consistent with the grid. Notifications have no feedback into the
//! simulation.

use crate::types::{CellPos, Role};
use serde::Serialize;
use std::sync::{Arc, Mutex};

/// Receiver of cell state changes.
pub trait GridObserver: Send {
    /// A cell became visible.
    fn reveal_cell(&mut self, pos: CellPos);

    /// A cell became hidden.
    fn hide_cell(&mut self, pos: CellPos);

    /// The queen arrived at (or left) a cell.
    fn set_queen(&mut self, pos: CellPos, present: bool);

    /// The population of a mobile role on a cell changed.
    fn set_count(&mut self, pos: CellPos, role: Role, count: u32);

    fn set_food(&mut self, pos: CellPos, amount: u32);

    fn set_pheromone(&mut self, pos: CellPos, level: u32);
}

/// One recorded notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GridEvent {
    Revealed(CellPos),
    Hidden(CellPos),
    Queen { pos: CellPos, present: bool },
    Count { pos: CellPos, role: Role, count: u32 },
    Food { pos: CellPos, amount: u32 },
    Pheromone { pos: CellPos, level: u32 },
}

impl GridEvent {
    pub fn pos(&self) -> CellPos {
        match self {
            GridEvent::Revealed(pos) | GridEvent::Hidden(pos) => *pos,
            GridEvent::Queen { pos, .. }
            | GridEvent::Count { pos, .. }
            | GridEvent::Food { pos, .. }
            | GridEvent::Pheromone { pos, .. } => *pos,
        }
    }
}

/// Discards every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl GridObserver for NullObserver {
    fn reveal_cell(&mut self, _pos: CellPos) {}
    fn hide_cell(&mut self, _pos: CellPos) {}
    fn set_queen(&mut self, _pos: CellPos, _present: bool) {}
    fn set_count(&mut self, _pos: CellPos, _role: Role, _count: u32) {}
    fn set_food(&mut self, _pos: CellPos, _amount: u32) {}
    fn set_pheromone(&mut self, _pos: CellPos, _level: u32) {}
}

/// Shared, cloneable view of the events a [`RecordingObserver`] captured.
#[derive(Debug, Default, Clone)]
pub struct EventLog(Arc<Mutex<Vec<GridEvent>>>);

impl EventLog {
    /// Copy of every event recorded so far.
    pub fn events(&self) -> Vec<GridEvent> {
        self.0.lock().map(|log| log.clone()).unwrap_or_default()
    }

    /// Remove and return every event recorded so far.
    pub fn drain(&self) -> Vec<GridEvent> {
        self.0
            .lock()
            .map(|mut log| std::mem::take(&mut *log))
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.0.lock().map(|log| log.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&self, event: GridEvent) {
        if let Ok(mut log) = self.0.lock() {
            log.push(event);
        }
    }
}

/// Records every notification in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    log: EventLog,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle that keeps reading the log after the observer moves into a grid.
    pub fn log(&self) -> EventLog {
        self.log.clone()
    }
}

impl GridObserver for RecordingObserver {
    fn reveal_cell(&mut self, pos: CellPos) {
        self.log.push(GridEvent::Revealed(pos));
    }

    fn hide_cell(&mut self, pos: CellPos) {
        self.log.push(GridEvent::Hidden(pos));
    }

    fn set_queen(&mut self, pos: CellPos, present: bool) {
        self.log.push(GridEvent::Queen { pos, present });
    }

    fn set_count(&mut self, pos: CellPos, role: Role, count: u32) {
        self.log.push(GridEvent::Count { pos, role, count });
    }

    fn set_food(&mut self, pos: CellPos, amount: u32) {
        self.log.push(GridEvent::Food { pos, amount });
    }

    fn set_pheromone(&mut self, pos: CellPos, level: u32) {
        self.log.push(GridEvent::Pheromone { pos, level });
    }
}

/// Emits each notification as a `trace`-level event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl GridObserver for TracingObserver {
    fn reveal_cell(&mut self, pos: CellPos) {
        tracing::trace!(%pos, "cell revealed");
    }

    fn hide_cell(&mut self, pos: CellPos) {
        tracing::trace!(%pos, "cell hidden");
    }

    fn set_queen(&mut self, pos: CellPos, present: bool) {
        tracing::trace!(%pos, present, "queen flag");
    }

    fn set_count(&mut self, pos: CellPos, role: Role, count: u32) {
        tracing::trace!(%pos, %role, count, "population");
    }

    fn set_food(&mut self, pos: CellPos, amount: u32) {
        tracing::trace!(%pos, amount, "food");
    }

    fn set_pheromone(&mut self, pos: CellPos, level: u32) {
        tracing::trace!(%pos, level, "pheromone");
    }
}
