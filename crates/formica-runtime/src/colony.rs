//! Colony - the tick scheduler.
//!
//! The colony owns the grid, the agent registry and the random stream,
//! and advances them one tick at a time. Each tick runs [`TICK_PHASES`] in
//! order:
//! 1. Refresh every cell's discovered-neighbour cache and halve its pheromone
//! 2. Scouts explore
//! 3. Foragers gather and return food
//! 4. Soldiers hunt invaders
//! 5. Invaders raid, then a new invader may arrive at the entry cell
//! 6. The queen eats and hatches
//!
//! Every phase snapshots its agent ids before anyone acts, so agents that
//! die mid-phase are skipped and agents born this tick wait for the next.
//! The queen's death stops the tick on the spot and collapses the colony.

use crate::clock::ColonyClock;
use crate::config::ColonyConfig;
use formica_agents::event::{AgentEvent, Death};
use formica_agents::lifecycle::Habitat;
use formica_agents::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One stage of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TickPhase {
    /// Cell maintenance: neighbour caches and pheromone decay.
    Refresh,
    Scouts,
    Foragers,
    Soldiers,
    /// Invader moves plus the chance of a new arrival.
    Invaders,
    Queen,
}

/// The fixed order of a tick.
pub const TICK_PHASES: [TickPhase; 6] = [
    TickPhase::Refresh,
    TickPhase::Scouts,
    TickPhase::Foragers,
    TickPhase::Soldiers,
    TickPhase::Invaders,
    TickPhase::Queen,
];

impl TickPhase {
    /// The role driven by this phase, if any.
    pub fn role(&self) -> Option<Role> {
        match self {
            TickPhase::Refresh => None,
            TickPhase::Scouts => Some(Role::Scout),
            TickPhase::Foragers => Some(Role::Forager),
            TickPhase::Soldiers => Some(Role::Soldier),
            TickPhase::Invaders => Some(Role::Invader),
            TickPhase::Queen => Some(Role::Queen),
        }
    }
}

impl fmt::Display for TickPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TickPhase::Refresh => write!(f, "Refresh"),
            TickPhase::Scouts => write!(f, "Scouts"),
            TickPhase::Foragers => write!(f, "Foragers"),
            TickPhase::Soldiers => write!(f, "Soldiers"),
            TickPhase::Invaders => write!(f, "Invaders"),
            TickPhase::Queen => write!(f, "Queen"),
        }
    }
}

/// Event emitted by the colony during simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ColonyEvent {
    /// The queen hatched a new member.
    Hatched { id: AgentId, role: Role, position: CellPos },
    /// An agent was placed from outside: an invader arrival or a test spawn.
    Spawned { id: AgentId, role: Role, position: CellPos },
    /// An agent died.
    Died { death: Death },
    Attacked { attacker: AgentId, target: AgentId, success: bool },
    FoodPickedUp { forager: AgentId, position: CellPos },
    FoodDelivered { forager: AgentId, position: CellPos },
    /// A scout revealed a cell.
    Discovered { scout: AgentId, position: CellPos, food: u32 },
    /// An agent's turn failed; the rest of the phase carried on.
    AgentFault { id: AgentId, phase: TickPhase, error: String },
    /// The queen died. No further ticks will run.
    ColonyCollapsed { tick: Tick, cause: DeathCause },
    /// A tick completed.
    TickComplete { tick: Tick, alive: usize, died_this_tick: u64 },
}

impl From<AgentEvent> for ColonyEvent {
    fn from(event: AgentEvent) -> Self {
        match event {
            AgentEvent::Hatched { id, role, position } => {
                ColonyEvent::Hatched { id, role, position }
            }
            AgentEvent::Died(death) => ColonyEvent::Died { death },
            AgentEvent::Attacked {
                attacker,
                target,
                success,
            } => ColonyEvent::Attacked {
                attacker,
                target,
                success,
            },
            AgentEvent::FoodPickedUp { forager, position } => {
                ColonyEvent::FoodPickedUp { forager, position }
            }
            AgentEvent::FoodDelivered { forager, position } => {
                ColonyEvent::FoodDelivered { forager, position }
            }
            AgentEvent::Discovered {
                scout,
                position,
                food,
            } => ColonyEvent::Discovered {
                scout,
                position,
                food,
            },
        }
    }
}

/// Statistics about the colony.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColonyStats {
    pub tick: Tick,
    /// Elapsed time as "N days, M turns".
    pub clock: String,
    pub queen_alive: bool,
    pub foragers: usize,
    pub scouts: usize,
    pub soldiers: usize,
    pub invaders: usize,
    /// Agents ever created, hatched or spawned.
    pub total_created: u64,
    pub total_died: u64,
    /// Food on the queen's cell, if she is alive.
    pub queen_food: Option<u32>,
    pub discovered_cells: usize,
}

/// A serializable snapshot of one cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellSnapshot {
    pub position: CellPos,
    pub discovered: bool,
    pub queen: bool,
    pub counts: RoleCounts,
    pub food: u32,
    pub pheromone: u32,
}

/// A complete serializable snapshot of the colony at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColonySnapshot {
    pub tick: Tick,
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<CellSnapshot>,
    pub stats: ColonyStats,
}

impl ColonySnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Grid tally against registry population for one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CensusLine {
    pub role: Role,
    /// Sum of the role's count over every cell.
    pub on_grid: u64,
    /// Live agents of the role in the registry.
    pub registered: u64,
}

impl CensusLine {
    pub fn balanced(&self) -> bool {
        self.on_grid == self.registered
    }
}

/// The colony - owns the world and runs the tick loop.
pub struct Colony {
    config: ColonyConfig,
    grid: Grid,
    registry: AgentRegistry,
    rng: RandomSource,
    clock: ColonyClock,
    tick: Tick,
    collapsed_at: Option<Tick>,
}

impl Colony {
    /// Build a colony from `config` with no observer attached.
    pub fn from_config(config: ColonyConfig) -> Result<Self> {
        Self::with_observer(config, Box::new(NullObserver))
    }

    /// Build a colony whose grid reports every change to `observer`.
    pub fn with_observer(config: ColonyConfig, observer: Box<dyn GridObserver>) -> Result<Self> {
        config.validate()?;
        let mut grid = Grid::new(config.rows, config.cols, observer)?;
        let mut registry = AgentRegistry::new();
        config.preset.apply(&mut grid, &mut registry)?;

        let rng = match config.seed {
            Some(seed) => RandomSource::seeded(seed),
            None => RandomSource::from_entropy(),
        };
        tracing::info!(
            rows = config.rows,
            cols = config.cols,
            seed = ?config.seed,
            agents = registry.len(),
            "colony initialized"
        );

        Ok(Self {
            clock: ColonyClock::new(config.turns_per_day),
            config,
            grid,
            registry,
            rng,
            tick: 0,
            collapsed_at: None,
        })
    }

    /// Replace the random stream (e.g. with a scripted one for testing).
    pub fn with_random_source(mut self, rng: RandomSource) -> Self {
        self.rng = rng;
        self
    }

    pub fn config(&self) -> &ColonyConfig {
        &self.config
    }

    /// Run a single simulation tick.
    ///
    /// Fails with `ColonyCollapsed` once the queen is dead.
    pub fn tick(&mut self) -> Result<Vec<ColonyEvent>> {
        if let Some(tick) = self.collapsed_at {
            return Err(FormicaError::ColonyCollapsed { tick });
        }

        self.tick += 1;
        self.clock.advance();
        let died_before = self.registry.total_died();
        let mut events = Vec::new();

        for phase in TICK_PHASES {
            if let Some(death) = self.run_phase(phase, &mut events) {
                self.collapsed_at = Some(self.tick);
                tracing::info!(
                    tick = self.tick,
                    clock = %self.clock,
                    cause = %death.cause,
                    "colony collapsed"
                );
                events.push(ColonyEvent::ColonyCollapsed {
                    tick: self.tick,
                    cause: death.cause,
                });
                return Ok(events);
            }
        }

        events.push(ColonyEvent::TickComplete {
            tick: self.tick,
            alive: self.registry.len(),
            died_this_tick: self.registry.total_died() - died_before,
        });
        Ok(events)
    }

    /// Run up to `ticks` ticks, stopping early if the colony collapses.
    pub fn run(&mut self, ticks: u64) -> Result<Vec<Vec<ColonyEvent>>> {
        let mut all_events = Vec::new();
        for _ in 0..ticks {
            if self.is_collapsed() {
                break;
            }
            all_events.push(self.tick()?);
        }
        Ok(all_events)
    }

    /// Run one phase; returns the queen's death if it ended the colony.
    fn run_phase(&mut self, phase: TickPhase, events: &mut Vec<ColonyEvent>) -> Option<Death> {
        match phase {
            TickPhase::Refresh => {
                self.grid.refresh();
                None
            }
            TickPhase::Scouts => self.drive::<Scout>(phase, events),
            TickPhase::Foragers => self.drive::<Forager>(phase, events),
            TickPhase::Soldiers => self.drive::<Soldier>(phase, events),
            TickPhase::Invaders => {
                let fatal = self.drive::<Invader>(phase, events);
                if fatal.is_none() && self.rng.percent(self.config.invader_spawn_percent) {
                    self.invader_arrives(events);
                }
                fatal
            }
            TickPhase::Queen => self.drive::<Queen>(phase, events),
        }
    }

    /// Give every member of `T` alive at phase start one turn, in id order.
    fn drive<T: Member>(
        &mut self,
        phase: TickPhase,
        events: &mut Vec<ColonyEvent>,
    ) -> Option<Death> {
        for id in self.registry.ids(T::ROLE) {
            // Killed earlier in this phase.
            let Some(mut agent) = self.registry.take::<T>(id) else {
                continue;
            };

            let mut emitted = Vec::new();
            let outcome = {
                let mut hab = Habitat::new(
                    &mut self.grid,
                    &mut self.registry,
                    &mut self.rng,
                    &mut emitted,
                );
                agent.take_turn(&mut hab)
            };
            self.registry.restore(agent);

            let queen_death = emitted.iter().find_map(|e| match e {
                AgentEvent::Died(d) if d.role == Role::Queen => Some(*d),
                _ => None,
            });
            events.extend(emitted.into_iter().map(ColonyEvent::from));

            if let Err(err) = outcome {
                tracing::warn!(agent = %id, %phase, error = %err, "agent turn failed");
                events.push(ColonyEvent::AgentFault {
                    id,
                    phase,
                    error: err.to_string(),
                });
            }

            if queen_death.is_some() {
                return queen_death;
            }
        }
        None
    }

    fn invader_arrives(&mut self, events: &mut Vec<ColonyEvent>) {
        let entry = self.config.invader_entry;
        match self.registry.create(&mut self.grid, Role::Invader, entry) {
            Ok(id) => {
                tracing::debug!(agent = %id, cell = %entry, "invader arrived");
                events.push(ColonyEvent::Spawned {
                    id,
                    role: Role::Invader,
                    position: entry,
                });
            }
            Err(err) => tracing::warn!(cell = %entry, error = %err, "invader arrival failed"),
        }
    }

    /// Place an agent by hand. The queen cannot be spawned.
    pub fn spawn(&mut self, role: Role, pos: CellPos) -> Result<AgentId> {
        if let Some(tick) = self.collapsed_at {
            return Err(FormicaError::ColonyCollapsed { tick });
        }
        if role == Role::Queen {
            return Err(FormicaError::invalid_role(role, "spawn_test"));
        }
        let id = self.registry.create(&mut self.grid, role, pos)?;
        tracing::debug!(agent = %id, %role, cell = %pos, "test spawn");
        Ok(id)
    }

    /// Compare per-cell tallies against registry populations, role by role.
    pub fn census(&self) -> Vec<CensusLine> {
        Role::ALL
            .iter()
            .map(|&role| CensusLine {
                role,
                on_grid: self.grid.total_count(role),
                registered: self.registry.population(role) as u64,
            })
            .collect()
    }

    /// Get colony statistics.
    pub fn stats(&self) -> ColonyStats {
        let queen_food = self
            .registry
            .queen()
            .map(|q| self.grid[q.location()].food());
        ColonyStats {
            tick: self.tick,
            clock: self.clock.to_string(),
            queen_alive: self.registry.queen().is_some(),
            foragers: self.registry.population(Role::Forager),
            scouts: self.registry.population(Role::Scout),
            soldiers: self.registry.population(Role::Soldier),
            invaders: self.registry.population(Role::Invader),
            total_created: self.registry.total_created(),
            total_died: self.registry.total_died(),
            queen_food,
            discovered_cells: self.grid.discovered_count(),
        }
    }

    /// Take a serializable snapshot of the colony's current state.
    pub fn snapshot(&self) -> ColonySnapshot {
        let cells = self
            .grid
            .cells()
            .map(|c| CellSnapshot {
                position: c.pos(),
                discovered: c.is_discovered(),
                queen: c.has_queen(),
                counts: c.counts(),
                food: c.food(),
                pheromone: c.pheromone(),
            })
            .collect();
        ColonySnapshot {
            tick: self.tick,
            rows: self.grid.rows(),
            cols: self.grid.cols(),
            cells,
            stats: self.stats(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable grid access, for setting up scenarios.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut AgentRegistry {
        &mut self.registry
    }

    pub fn rng(&self) -> &RandomSource {
        &self.rng
    }

    /// Ticks completed so far.
    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    pub fn clock(&self) -> ColonyClock {
        self.clock
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed_at.is_some()
    }
}

impl fmt::Debug for Colony {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Colony")
            .field("tick", &self.tick)
            .field("agents", &self.registry.len())
            .field("collapsed_at", &self.collapsed_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::ColonyPreset;

    fn lone_queen(food: u32) -> ColonyConfig {
        ColonyConfig {
            rows: 5,
            cols: 5,
            seed: Some(1),
            invader_spawn_percent: 0,
            preset: ColonyPreset::queen_only(food).with_queen_at(CellPos::new(2, 2)),
            ..ColonyConfig::default()
        }
    }

    #[test]
    fn phases_run_in_fixed_order() {
        let roles: Vec<Option<Role>> = TICK_PHASES.iter().map(|p| p.role()).collect();
        assert_eq!(
            roles,
            vec![
                None,
                Some(Role::Scout),
                Some(Role::Forager),
                Some(Role::Soldier),
                Some(Role::Invader),
                Some(Role::Queen),
            ]
        );
    }

    #[test]
    fn tick_complete_closes_every_tick() {
        let mut colony = Colony::from_config(lone_queen(10)).unwrap();
        let events = colony.tick().unwrap();
        assert!(matches!(
            events.last(),
            Some(ColonyEvent::TickComplete { tick: 1, alive: 1, died_this_tick: 0 })
        ));
        assert_eq!(colony.current_tick(), 1);
    }

    #[test]
    fn spawn_rejects_queen() {
        let mut colony = Colony::from_config(lone_queen(10)).unwrap();
        let err = colony.spawn(Role::Queen, CellPos::origin()).unwrap_err();
        assert!(matches!(err, FormicaError::InvalidRole { role: Role::Queen, .. }));
    }

    #[test]
    fn spawn_out_of_bounds_fails() {
        let mut colony = Colony::from_config(lone_queen(10)).unwrap();
        let err = colony.spawn(Role::Scout, CellPos::new(9, 9)).unwrap_err();
        assert!(matches!(err, FormicaError::OutOfBounds { .. }));
    }

    #[test]
    fn faults_are_isolated() {
        // A soldier boxed in by undiscovered cells cannot patrol; the queen
        // still takes her turn.
        let mut colony = Colony::from_config(lone_queen(10)).unwrap();
        let stuck = colony.spawn(Role::Soldier, CellPos::origin()).unwrap();
        let events = colony.tick().unwrap();

        assert!(events.iter().any(|e| matches!(
            e,
            ColonyEvent::AgentFault { id, phase: TickPhase::Soldiers, .. } if *id == stuck
        )));
        assert!(colony.registry().contains(stuck));
        assert_eq!(colony.stats().queen_food, Some(9));
    }

    #[test]
    fn snapshot_serializes() {
        let colony = Colony::from_config(lone_queen(10)).unwrap();
        let json = colony.snapshot().to_json().unwrap();
        assert!(json.contains("\"queen_alive\": true"));
        assert_eq!(colony.snapshot().cells.len(), 25);
    }
}
