//! Controller - the run/step/stop state machine in front of a colony.
//!
//! States move `Paused -> Running -> Paused` under operator control and end
//! in `Halted` when the queen dies. Continuous runs check a shared stop
//! flag between ticks, never mid-tick.

use crate::colony::{Colony, ColonyEvent};
use crate::config::ColonyConfig;
use crate::preset::ColonyPreset;
use formica_core::prelude::*;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ControlState {
    Paused,
    Running,
    /// The colony collapsed; only `initialize` leaves this state.
    Halted,
}

/// Clonable handle that interrupts a continuous run from anywhere.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Why a continuous run returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunOutcome {
    /// The requested number of ticks completed.
    Completed { ticks: u64 },
    /// The stop flag was raised.
    Stopped { ticks: u64 },
    /// The queen died.
    Collapsed { ticks: u64 },
}

/// Operator-facing control over one colony.
#[derive(Debug)]
pub struct Controller {
    base: ColonyConfig,
    colony: Option<Colony>,
    state: ControlState,
    stop: StopHandle,
}

impl Controller {
    /// A controller with no colony yet; `base` supplies everything
    /// `initialize` does not override.
    pub fn new(base: ColonyConfig) -> Self {
        Self {
            base,
            colony: None,
            state: ControlState::Paused,
            stop: StopHandle::default(),
        }
    }

    /// Build a fresh colony of `rows` x `cols` laid out by `preset`.
    pub fn initialize(
        &mut self,
        rows: usize,
        cols: usize,
        preset: ColonyPreset,
        observer: Box<dyn GridObserver>,
    ) -> Result<()> {
        let config = ColonyConfig {
            rows,
            cols,
            preset,
            ..self.base.clone()
        };
        self.colony = Some(Colony::with_observer(config, observer)?);
        self.set_state(ControlState::Paused);
        Ok(())
    }

    /// Install an already-built colony.
    pub fn attach(&mut self, colony: Colony) {
        let state = if colony.is_collapsed() {
            ControlState::Halted
        } else {
            ControlState::Paused
        };
        self.colony = Some(colony);
        self.set_state(state);
    }

    /// Tick continuously, `tick_interval_ms` apart, until `max_ticks` have
    /// run (if given), the stop flag is raised, or the colony collapses.
    ///
    /// `on_tick` sees each tick's events as they happen.
    pub fn run<F>(&mut self, max_ticks: Option<u64>, mut on_tick: F) -> Result<RunOutcome>
    where
        F: FnMut(&Colony, &[ColonyEvent]),
    {
        self.ensure_live()?;
        let interval = Duration::from_millis(self.base.tick_interval_ms);
        self.stop.reset();
        self.set_state(ControlState::Running);

        let mut ticks = 0;
        let outcome = loop {
            if max_ticks.is_some_and(|max| ticks >= max) {
                break RunOutcome::Completed { ticks };
            }
            if self.stop.is_stopped() {
                break RunOutcome::Stopped { ticks };
            }

            let colony = self.colony_mut()?;
            let events = colony.tick()?;
            ticks += 1;
            on_tick(colony, &events);
            if colony.is_collapsed() {
                break RunOutcome::Collapsed { ticks };
            }

            if !interval.is_zero() {
                std::thread::sleep(interval);
            }
        };

        let next = match outcome {
            RunOutcome::Collapsed { .. } => ControlState::Halted,
            _ => ControlState::Paused,
        };
        self.set_state(next);
        Ok(outcome)
    }

    /// Advance exactly one tick and pause.
    pub fn step(&mut self) -> Result<Vec<ColonyEvent>> {
        self.ensure_live()?;
        self.stop.stop();
        let colony = self.colony_mut()?;
        let events = colony.tick()?;
        let next = if colony.is_collapsed() {
            ControlState::Halted
        } else {
            ControlState::Paused
        };
        self.set_state(next);
        Ok(events)
    }

    /// Halt a continuous run at the next tick boundary.
    pub fn stop(&mut self) {
        self.stop.stop();
        if self.state == ControlState::Running {
            self.set_state(ControlState::Paused);
        }
    }

    /// Debug injection of a mobile agent.
    pub fn spawn_test(&mut self, role: Role, pos: CellPos) -> Result<AgentId> {
        self.colony_mut()?.spawn(role, pos)
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn state(&self) -> ControlState {
        self.state
    }

    pub fn colony(&self) -> Option<&Colony> {
        self.colony.as_ref()
    }

    fn colony_mut(&mut self) -> Result<&mut Colony> {
        self.colony
            .as_mut()
            .ok_or_else(|| FormicaError::invalid_config("colony", "controller is not initialized"))
    }

    fn ensure_live(&self) -> Result<()> {
        match &self.colony {
            None => Err(FormicaError::invalid_config("colony", "controller is not initialized")),
            Some(colony) if colony.is_collapsed() => Err(FormicaError::ColonyCollapsed {
                tick: colony.current_tick(),
            }),
            Some(_) => Ok(()),
        }
    }

    fn set_state(&mut self, state: ControlState) {
        if self.state != state {
            tracing::info!(from = ?self.state, to = ?state, "controller state changed");
            self.state = state;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick() -> ColonyConfig {
        ColonyConfig {
            seed: Some(5),
            tick_interval_ms: 0,
            invader_spawn_percent: 0,
            ..ColonyConfig::default()
        }
    }

    #[test]
    fn uninitialized_controller_refuses_commands() {
        let mut ctl = Controller::new(quick());
        assert!(matches!(ctl.step(), Err(FormicaError::Config { .. })));
        assert!(ctl.spawn_test(Role::Scout, CellPos::origin()).is_err());
    }

    #[test]
    fn step_advances_one_tick_and_pauses() {
        let mut ctl = Controller::new(quick());
        ctl.initialize(9, 9, ColonyPreset::standard(), Box::new(NullObserver))
            .unwrap();
        ctl.step().unwrap();
        assert_eq!(ctl.state(), ControlState::Paused);
        assert_eq!(ctl.colony().map(|c| c.current_tick()), Some(1));
    }

    #[test]
    fn run_honours_tick_limit() {
        let mut ctl = Controller::new(quick());
        ctl.initialize(9, 9, ColonyPreset::standard(), Box::new(NullObserver))
            .unwrap();
        let mut seen = 0;
        let outcome = ctl.run(Some(4), |_, _| seen += 1).unwrap();
        assert_eq!(outcome, RunOutcome::Completed { ticks: 4 });
        assert_eq!(seen, 4);
        assert_eq!(ctl.state(), ControlState::Paused);
    }

    #[test]
    fn stop_handle_interrupts_between_ticks() {
        let mut ctl = Controller::new(quick());
        ctl.initialize(9, 9, ColonyPreset::standard(), Box::new(NullObserver))
            .unwrap();
        let handle = ctl.stop_handle();
        let outcome = ctl
            .run(None, |colony, _| {
                if colony.current_tick() == 3 {
                    handle.stop();
                }
            })
            .unwrap();
        assert_eq!(outcome, RunOutcome::Stopped { ticks: 3 });
    }

    #[test]
    fn collapse_halts_the_controller() {
        let mut ctl = Controller::new(quick());
        ctl.initialize(3, 3, ColonyPreset::queen_only(2), Box::new(NullObserver))
            .unwrap();
        let outcome = ctl.run(None, |_, _| {}).unwrap();
        assert_eq!(outcome, RunOutcome::Collapsed { ticks: 3 });
        assert_eq!(ctl.state(), ControlState::Halted);
        assert!(matches!(ctl.step(), Err(FormicaError::ColonyCollapsed { tick: 3 })));
    }
}
