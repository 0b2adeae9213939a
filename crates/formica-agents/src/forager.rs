//! Forager - finds food in discovered territory and carries it home.
//!
//! A foraging ant walks outward, remembering every cell it leaves on a
//! stack. When it lands on food it picks up one unit and retraces the
//! stack back to the queen, laying pheromone along the way. Later foragers
//! follow the strongest trail.

use crate::event::AgentEvent;
use crate::lifecycle::{self, Habitat};
use formica_core::prelude::*;

/// Pheromone laid per returning step.
pub const PHEROMONE_DEPOSIT: u32 = 10;

/// The last eight cells a forager moved to, oldest first.
///
/// When the newer half equals the older half the forager is walking an
/// eight-step cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecentMoves {
    slots: [CellPos; 8],
}

impl RecentMoves {
    /// A ring filled with the spawn cell.
    pub fn new(start: CellPos) -> Self {
        Self { slots: [start; 8] }
    }

    /// Build a ring from explicit entries, oldest first.
    pub fn from_slots(slots: [CellPos; 8]) -> Self {
        Self { slots }
    }

    pub fn record(&mut self, pos: CellPos) {
        self.slots.rotate_left(1);
        self.slots[7] = pos;
    }

    pub fn is_looping(&self) -> bool {
        self.slots[0..4] == self.slots[4..8]
    }

    pub fn slots(&self) -> &[CellPos; 8] {
        &self.slots
    }
}

/// A food-gathering colony member.
#[derive(Debug, Clone)]
pub struct Forager {
    vitals: Vitals,
    carrying_food: bool,
    /// Cells left while foraging; popped one per tick on the way home.
    move_history: Vec<CellPos>,
    recent: RecentMoves,
}

impl Forager {
    pub fn new(id: AgentId, location: CellPos) -> Self {
        Self {
            vitals: Vitals::new(id, Role::Forager, location),
            carrying_food: false,
            move_history: Vec::new(),
            recent: RecentMoves::new(location),
        }
    }

    pub fn is_carrying(&self) -> bool {
        self.carrying_food
    }

    pub fn move_history(&self) -> &[CellPos] {
        &self.move_history
    }

    pub fn recent_moves(&self) -> &RecentMoves {
        &self.recent
    }

    /// Push a cell onto the way-home stack.
    pub fn remember(&mut self, pos: CellPos) {
        self.move_history.push(pos);
    }

    /// Load one unit of food (taken from elsewhere by the caller).
    pub fn load(&mut self) {
        self.carrying_food = true;
    }

    pub fn set_recent_moves(&mut self, recent: RecentMoves) {
        self.recent = recent;
    }

    /// One tick of forager behaviour.
    pub fn act(&mut self, hab: &mut Habitat<'_>) -> Result<LifeState> {
        if lifecycle::age(hab, &mut self.vitals)? == LifeState::Dead {
            return Ok(LifeState::Dead);
        }

        let destination = if self.carrying_food {
            self.head_home(hab)?
        } else {
            Some(self.forage(hab)?)
        };

        if let Some(to) = destination {
            self.step_to(hab.grid, to);
            self.recent.record(to);
        }
        Ok(LifeState::Alive)
    }

    /// Returning leg: lay pheromone, retrace one step, deliver at the queen.
    fn head_home(&mut self, hab: &mut Habitat<'_>) -> Result<Option<CellPos>> {
        let here = self.location();
        let cell = &hab.grid[here];
        if !cell.has_queen() && cell.pheromone() < PHEROMONE_MAX {
            hab.grid.deposit_pheromone(here, PHEROMONE_DEPOSIT)?;
        }

        let Some(to) = self.move_history.pop() else {
            // Nothing left to retrace: drop the load here and start over.
            tracing::debug!(agent = %self.id(), cell = %here, "forager lost its way home");
            let food = hab.grid[here].food().saturating_add(1);
            hab.grid.set_food(here, food)?;
            self.carrying_food = false;
            return Ok(None);
        };
        hab.grid.check(to)?;

        if hab.grid[to].has_queen() {
            let food = hab.grid[to].food().saturating_add(1);
            hab.grid.set_food(to, food)?;
            self.carrying_food = false;
            hab.events.push(AgentEvent::FoodDelivered {
                forager: self.id(),
                position: to,
            });
        }
        Ok(Some(to))
    }

    /// Outbound leg: choose a discovered neighbour and pick up food there.
    fn forage(&mut self, hab: &mut Habitat<'_>) -> Result<CellPos> {
        let here = self.location();
        let to = self.choose_destination(hab.grid, hab.rng)?;
        self.move_history.push(here);

        let food = hab.grid[to].food();
        if food > 0 && !hab.grid[to].has_queen() {
            hab.grid.set_food(to, food - 1)?;
            self.carrying_food = true;
            hab.events.push(AgentEvent::FoodPickedUp {
                forager: self.id(),
                position: to,
            });
        }
        Ok(to)
    }

    /// Pick the next cell among the discovered neighbours of the current cell.
    pub fn choose_destination(&self, grid: &Grid, rng: &mut RandomSource) -> Result<CellPos> {
        let here = self.location();
        let neighbors = grid.discovered_neighbors(here);
        let last = self.move_history.last().copied();

        match neighbors {
            [] => Err(FormicaError::empty(Some(self.id()), "forager destination")),
            [only] => Ok(*only),
            [first, second] => Ok(if last == Some(*first) { *second } else { *first }),
            _ => {
                let mut candidates = neighbors.to_vec();
                if !grid[here].has_queen() {
                    if let Some(last) = last {
                        candidates.retain(|&c| c != last);
                    }
                }

                if self.recent.is_looping() {
                    return rng
                        .choose(&candidates, Some(self.id()), "forager loop break")
                        .copied();
                }

                let trail = candidates
                    .iter()
                    .copied()
                    .filter(|&c| grid[c].pheromone() > 0)
                    .max_by_key(|&c| grid[c].pheromone());
                match trail {
                    Some(best) => Ok(best),
                    None => rng
                        .choose(&candidates, Some(self.id()), "forager wander")
                        .copied(),
                }
            }
        }
    }
}

impl Mobile for Forager {
    fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    fn vitals_mut(&mut self) -> &mut Vitals {
        &mut self.vitals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::AgentRegistry;

    #[test]
    fn ring_detects_eight_step_cycle() {
        let a = CellPos::new(0, 0);
        let b = CellPos::new(0, 1);
        let mut ring = RecentMoves::new(a);
        for pos in [a, b, a, b, a, b, a, b] {
            ring.record(pos);
        }
        assert!(ring.is_looping());
        ring.record(CellPos::new(1, 1));
        assert!(!ring.is_looping());
    }

    #[test]
    fn ring_keeps_newest_last() {
        let mut ring = RecentMoves::new(CellPos::origin());
        ring.record(CellPos::new(2, 2));
        assert_eq!(ring.slots()[7], CellPos::new(2, 2));
        assert_eq!(ring.slots()[0], CellPos::origin());
    }

    #[test]
    fn empty_history_takes_first_of_two() {
        let mut grid = Grid::headless(1, 3).unwrap();
        grid.set_discovered(CellPos::new(0, 0), true).unwrap();
        grid.set_discovered(CellPos::new(0, 2), true).unwrap();
        grid.refresh();
        let forager = Forager::new(AgentId(0), CellPos::new(0, 1));
        let mut rng = RandomSource::scripted([]);
        let to = forager.choose_destination(&grid, &mut rng).unwrap();
        assert_eq!(to, CellPos::new(0, 0));
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn no_discovered_neighbours_is_an_error() {
        let grid = Grid::headless(3, 3).unwrap();
        let forager = Forager::new(AgentId(4), CellPos::new(1, 1));
        let mut rng = RandomSource::scripted([]);
        let err = forager.choose_destination(&grid, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            FormicaError::EmptyCandidates { agent: Some(AgentId(4)), .. }
        ));
    }

    #[test]
    fn pheromone_ties_go_to_the_later_neighbour() {
        let mut grid = Grid::headless(3, 3).unwrap();
        let centre = CellPos::new(1, 1);
        grid.reveal_neighborhood(centre).unwrap();
        grid.refresh();
        grid.set_pheromone(CellPos::new(0, 1), 40).unwrap();
        grid.set_pheromone(CellPos::new(2, 1), 40).unwrap();

        let mut forager = Forager::new(AgentId(0), centre);
        forager.set_recent_moves(RecentMoves::from_slots([
            CellPos::new(0, 0),
            CellPos::new(0, 1),
            CellPos::new(0, 2),
            CellPos::new(1, 0),
            CellPos::new(1, 2),
            CellPos::new(2, 0),
            CellPos::new(2, 1),
            CellPos::new(2, 2),
        ]));
        let mut rng = RandomSource::scripted([]);
        let to = forager.choose_destination(&grid, &mut rng).unwrap();
        assert_eq!(to, CellPos::new(2, 1));
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn returning_with_no_history_drops_food() {
        let mut grid = Grid::headless(3, 3).unwrap();
        let mut registry = AgentRegistry::new();
        let mut rng = RandomSource::scripted([]);
        let mut events = Vec::new();
        let pos = CellPos::new(0, 2);
        let id = registry.create(&mut grid, Role::Forager, pos).unwrap();
        let mut forager = registry.take::<Forager>(id).unwrap();
        forager.load();

        let mut hab = Habitat::new(&mut grid, &mut registry, &mut rng, &mut events);
        assert_eq!(forager.act(&mut hab).unwrap(), LifeState::Alive);
        assert!(!forager.is_carrying());
        assert_eq!(forager.location(), pos);
        assert_eq!(grid[pos].food(), 1);
        assert_eq!(grid[pos].pheromone(), PHEROMONE_DEPOSIT);
    }
}
