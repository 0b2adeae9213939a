//! Grid - the arena of cells every agent reads and mutates.
//!
//! Cells live in a row-major `Vec` addressed by [`CellPos`]; agents hold a
//! position, never a reference, so there are no ownership cycles between
//! cells, agents and the scheduler.
//!
//! All mutation goes through `Grid` setters. Each setter notifies the
//! attached [`GridObserver`] so the external view tracks the grid exactly.

use crate::error::{FormicaError, Result};
use crate::observer::{GridObserver, NullObserver};
use crate::types::{AgentId, CellPos, Role, RoleCounts, PHEROMONE_MAX};
use std::ops::Index;

/// One grid position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pos: CellPos,
    discovered: bool,
    queen_present: bool,
    counts: RoleCounts,
    food: u32,
    pheromone: u32,
    /// Up to eight neighbours, fixed at construction.
    adjacency: Vec<CellPos>,
    /// Discovered subset of `adjacency`, as of the last refresh.
    discovered_neighbors: Vec<CellPos>,
    occupants: Vec<AgentId>,
}

impl Cell {
    fn new(pos: CellPos, adjacency: Vec<CellPos>) -> Self {
        Self {
            pos,
            discovered: false,
            queen_present: false,
            counts: RoleCounts::default(),
            food: 0,
            pheromone: 0,
            adjacency,
            discovered_neighbors: Vec::new(),
            occupants: Vec::new(),
        }
    }

    pub fn pos(&self) -> CellPos {
        self.pos
    }

    pub fn is_discovered(&self) -> bool {
        self.discovered
    }

    pub fn has_queen(&self) -> bool {
        self.queen_present
    }

    pub fn counts(&self) -> RoleCounts {
        self.counts
    }

    pub fn count(&self, role: Role) -> u32 {
        self.counts.get(role)
    }

    pub fn food(&self) -> u32 {
        self.food
    }

    pub fn pheromone(&self) -> u32 {
        self.pheromone
    }

    pub fn adjacency(&self) -> &[CellPos] {
        &self.adjacency
    }

    pub fn discovered_neighbors(&self) -> &[CellPos] {
        &self.discovered_neighbors
    }

    /// Agent ids on this cell, in arrival order.
    pub fn occupants(&self) -> &[AgentId] {
        &self.occupants
    }
}

/// The R×C cell arena plus its observer.
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    observer: Box<dyn GridObserver>,
}

impl Grid {
    /// Build a grid with every cell hidden and empty.
    pub fn new(rows: usize, cols: usize, observer: Box<dyn GridObserver>) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(FormicaError::invalid_config(
                "grid",
                format!("dimensions must be positive, got {}x{}", rows, cols),
            ));
        }

        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                let pos = CellPos::new(row, col);
                cells.push(Cell::new(pos, neighbors_of(pos, rows, cols)));
            }
        }

        let mut grid = Self {
            rows,
            cols,
            cells,
            observer,
        };
        for i in 0..grid.cells.len() {
            let pos = grid.cells[i].pos;
            grid.observer.hide_cell(pos);
        }
        Ok(grid)
    }

    /// A grid whose notifications go nowhere.
    pub fn headless(rows: usize, cols: usize) -> Result<Self> {
        Self::new(rows, cols, Box::new(NullObserver))
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, pos: CellPos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Fail with `OutOfBounds` unless `pos` is on the grid.
    pub fn check(&self, pos: CellPos) -> Result<()> {
        if self.contains(pos) {
            Ok(())
        } else {
            Err(FormicaError::OutOfBounds {
                pos,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    pub fn get(&self, pos: CellPos) -> Option<&Cell> {
        if self.contains(pos) {
            Some(&self.cells[self.index_of(pos)])
        } else {
            None
        }
    }

    /// All cells, row-major.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn adjacency(&self, pos: CellPos) -> &[CellPos] {
        self[pos].adjacency()
    }

    pub fn discovered_neighbors(&self, pos: CellPos) -> &[CellPos] {
        self[pos].discovered_neighbors()
    }

    /// Start-of-tick maintenance for every cell, row-major: rebuild the
    /// discovered-neighbour cache, then halve the pheromone level.
    pub fn refresh(&mut self) {
        for i in 0..self.cells.len() {
            let discovered: Vec<CellPos> = self.cells[i]
                .adjacency
                .iter()
                .copied()
                .filter(|&n| self.cells[self.index_of(n)].discovered)
                .collect();
            let cell = &mut self.cells[i];
            cell.discovered_neighbors = discovered;

            let before = cell.pheromone;
            cell.pheromone = before / 2;
            if cell.pheromone != before {
                let (pos, level) = (cell.pos, cell.pheromone);
                self.observer.set_pheromone(pos, level);
            }
        }
    }

    pub fn set_discovered(&mut self, pos: CellPos, discovered: bool) -> Result<()> {
        self.check(pos)?;
        let i = self.index_of(pos);
        self.cells[i].discovered = discovered;
        if discovered {
            self.observer.reveal_cell(pos);
        } else {
            self.observer.hide_cell(pos);
        }
        Ok(())
    }

    /// Reveal `pos` and all of its neighbours.
    pub fn reveal_neighborhood(&mut self, pos: CellPos) -> Result<()> {
        self.set_discovered(pos, true)?;
        let adjacency = self[pos].adjacency.clone();
        for n in adjacency {
            self.set_discovered(n, true)?;
        }
        Ok(())
    }

    pub fn set_queen_present(&mut self, pos: CellPos, present: bool) -> Result<()> {
        self.check(pos)?;
        self.write_queen(pos, present);
        Ok(())
    }

    /// Overwrite the population of a mobile role on a cell.
    pub fn set_count(&mut self, pos: CellPos, role: Role, count: u32) -> Result<()> {
        self.check(pos)?;
        let i = self.index_of(pos);
        let slot = self.cells[i]
            .counts
            .slot_mut(role)
            .ok_or_else(|| FormicaError::invalid_role(role, "set_count"))?;
        *slot = count;
        self.observer.set_count(pos, role, count);
        Ok(())
    }

    pub fn set_food(&mut self, pos: CellPos, amount: u32) -> Result<()> {
        self.check(pos)?;
        let i = self.index_of(pos);
        self.cells[i].food = amount;
        self.observer.set_food(pos, amount);
        Ok(())
    }

    /// Set the pheromone level, clamped to [`PHEROMONE_MAX`].
    pub fn set_pheromone(&mut self, pos: CellPos, level: u32) -> Result<()> {
        self.check(pos)?;
        let i = self.index_of(pos);
        let level = level.min(PHEROMONE_MAX);
        self.cells[i].pheromone = level;
        self.observer.set_pheromone(pos, level);
        Ok(())
    }

    pub fn deposit_pheromone(&mut self, pos: CellPos, amount: u32) -> Result<()> {
        self.check(pos)?;
        let level = self[pos].pheromone.saturating_add(amount);
        self.set_pheromone(pos, level)
    }

    /// Register an agent on a cell: bump its role count (or raise the queen
    /// flag) and add it to the occupant set.
    ///
    /// Panics if `pos` is off the grid, like indexing.
    pub fn arrive(&mut self, pos: CellPos, id: AgentId, role: Role) {
        if role == Role::Queen {
            self.write_queen(pos, true);
        } else {
            let count = self[pos].count(role) + 1;
            self.write_count(pos, role, count);
        }
        let i = self.index_of(pos);
        self.cells[i].occupants.push(id);
    }

    /// Inverse of [`Grid::arrive`].
    pub fn depart(&mut self, pos: CellPos, id: AgentId, role: Role) {
        if role == Role::Queen {
            self.write_queen(pos, false);
        } else {
            let count = self[pos].count(role).saturating_sub(1);
            self.write_count(pos, role, count);
        }
        let i = self.index_of(pos);
        self.cells[i].occupants.retain(|&o| o != id);
    }

    /// Move an agent between cells (`depart` then `arrive`).
    pub fn relocate(&mut self, from: CellPos, to: CellPos, id: AgentId, role: Role) {
        self.depart(from, id, role);
        self.arrive(to, id, role);
    }

    /// Number of agents of `role` tallied across all cells.
    pub fn total_count(&self, role: Role) -> u64 {
        match role {
            Role::Queen => self.cells.iter().filter(|c| c.queen_present).count() as u64,
            _ => self.cells.iter().map(|c| c.count(role) as u64).sum(),
        }
    }

    pub fn discovered_count(&self) -> usize {
        self.cells.iter().filter(|c| c.discovered).count()
    }

    fn write_queen(&mut self, pos: CellPos, present: bool) {
        let i = self.index_of(pos);
        self.cells[i].queen_present = present;
        self.observer.set_queen(pos, present);
    }

    fn write_count(&mut self, pos: CellPos, role: Role, count: u32) {
        let i = self.index_of(pos);
        if let Some(slot) = self.cells[i].counts.slot_mut(role) {
            *slot = count;
            self.observer.set_count(pos, role, count);
        }
    }

    fn index_of(&self, pos: CellPos) -> usize {
        assert!(self.contains(pos), "cell {} outside {}x{} grid", pos, self.rows, self.cols);
        pos.row * self.cols + pos.col
    }
}

impl Index<CellPos> for Grid {
    type Output = Cell;

    /// Panics if `pos` is off the grid; agents only ever hold on-grid positions.
    fn index(&self, pos: CellPos) -> &Cell {
        &self.cells[self.index_of(pos)]
    }
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("discovered", &self.discovered_count())
            .finish()
    }
}

/// Bounded 8-neighbourhood of `pos`, row-major from the top-left neighbour.
fn neighbors_of(pos: CellPos, rows: usize, cols: usize) -> Vec<CellPos> {
    let mut out = Vec::with_capacity(8);
    for dr in -1i64..=1 {
        for dc in -1i64..=1 {
            if dr == 0 && dc == 0 {
                continue;
            }
            let r = pos.row as i64 + dr;
            let c = pos.col as i64 + dc;
            if r >= 0 && c >= 0 && (r as usize) < rows && (c as usize) < cols {
                out.push(CellPos::new(r as usize, c as usize));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::{GridEvent, RecordingObserver};

    #[test]
    fn adjacency_is_grid_bounded() {
        let grid = Grid::headless(3, 3).unwrap();
        assert_eq!(grid.adjacency(CellPos::new(0, 0)).len(), 3);
        assert_eq!(grid.adjacency(CellPos::new(0, 1)).len(), 5);
        assert_eq!(grid.adjacency(CellPos::new(1, 1)).len(), 8);
        assert_eq!(
            grid.adjacency(CellPos::new(0, 0)),
            &[CellPos::new(0, 1), CellPos::new(1, 0), CellPos::new(1, 1)]
        );
    }

    #[test]
    fn zero_sized_grid_rejected() {
        assert!(matches!(Grid::headless(0, 4), Err(FormicaError::Config { .. })));
    }

    #[test]
    fn refresh_halves_pheromone_with_floor() {
        let mut grid = Grid::headless(2, 2).unwrap();
        let pos = CellPos::new(1, 1);
        grid.set_pheromone(pos, 7).unwrap();
        grid.refresh();
        assert_eq!(grid[pos].pheromone(), 3);
        grid.refresh();
        assert_eq!(grid[pos].pheromone(), 1);
        grid.refresh();
        assert_eq!(grid[pos].pheromone(), 0);
        grid.refresh();
        assert_eq!(grid[pos].pheromone(), 0);
    }

    #[test]
    fn pheromone_is_clamped() {
        let mut grid = Grid::headless(2, 2).unwrap();
        let pos = CellPos::new(0, 0);
        grid.set_pheromone(pos, 995).unwrap();
        grid.deposit_pheromone(pos, 10).unwrap();
        assert_eq!(grid[pos].pheromone(), PHEROMONE_MAX);
    }

    #[test]
    fn discovered_neighbors_only_change_on_refresh() {
        let mut grid = Grid::headless(3, 3).unwrap();
        let center = CellPos::new(1, 1);
        grid.set_discovered(CellPos::new(0, 0), true).unwrap();
        assert!(grid.discovered_neighbors(center).is_empty());

        grid.refresh();
        assert_eq!(grid.discovered_neighbors(center), &[CellPos::new(0, 0)]);

        grid.set_discovered(CellPos::new(2, 2), true).unwrap();
        assert_eq!(grid.discovered_neighbors(center).len(), 1);
        grid.refresh();
        assert_eq!(grid.discovered_neighbors(center).len(), 2);
    }

    #[test]
    fn arrive_and_depart_keep_counts_and_occupants_together() {
        let mut grid = Grid::headless(2, 2).unwrap();
        let a = CellPos::new(0, 0);
        let b = CellPos::new(1, 1);
        let id = AgentId(4);

        grid.arrive(a, id, Role::Soldier);
        assert_eq!(grid[a].count(Role::Soldier), 1);
        assert_eq!(grid[a].occupants(), &[id]);

        grid.relocate(a, b, id, Role::Soldier);
        assert_eq!(grid[a].count(Role::Soldier), 0);
        assert!(grid[a].occupants().is_empty());
        assert_eq!(grid[b].count(Role::Soldier), 1);
        assert_eq!(grid.total_count(Role::Soldier), 1);
    }

    #[test]
    fn queen_uses_presence_flag() {
        let mut grid = Grid::headless(2, 2).unwrap();
        let pos = CellPos::new(1, 0);
        grid.arrive(pos, AgentId(0), Role::Queen);
        assert!(grid[pos].has_queen());
        assert_eq!(grid[pos].counts().total(), 0);
        assert!(grid.set_count(pos, Role::Queen, 1).is_err());
        grid.depart(pos, AgentId(0), Role::Queen);
        assert!(!grid[pos].has_queen());
    }

    #[test]
    fn off_grid_writes_are_rejected() {
        let obs = RecordingObserver::new();
        let log = obs.log();
        let mut grid = Grid::new(5, 5, Box::new(obs)).unwrap();
        log.drain();
        let before: Vec<Cell> = grid.cells().cloned().collect();

        let wide = CellPos::new(0, 7);
        let out = FormicaError::OutOfBounds { pos: wide, rows: 5, cols: 5 };
        assert_eq!(grid.set_food(wide, 9), Err(out.clone()));
        assert_eq!(grid.set_pheromone(wide, 9), Err(out.clone()));
        assert_eq!(grid.deposit_pheromone(wide, 9), Err(out.clone()));
        assert_eq!(grid.set_queen_present(wide, true), Err(out.clone()));
        assert_eq!(grid.set_count(wide, Role::Scout, 2), Err(out));
        assert!(grid.set_discovered(CellPos::new(0, 6), true).is_err());
        assert!(grid.reveal_neighborhood(CellPos::new(5, 0)).is_err());

        let after: Vec<Cell> = grid.cells().cloned().collect();
        assert_eq!(after, before);
        assert!(log.is_empty());
    }

    #[test]
    fn setters_notify_observer_in_order() {
        let obs = RecordingObserver::new();
        let log = obs.log();
        let mut grid = Grid::new(2, 2, Box::new(obs)).unwrap();
        assert_eq!(log.drain().len(), 4, "every cell starts hidden");

        let pos = CellPos::new(0, 1);
        grid.set_discovered(pos, true).unwrap();
        grid.set_food(pos, 12).unwrap();
        grid.arrive(pos, AgentId(1), Role::Forager);
        grid.set_pheromone(pos, 40).unwrap();
        grid.refresh();

        assert_eq!(
            log.events(),
            vec![
                GridEvent::Revealed(pos),
                GridEvent::Food { pos, amount: 12 },
                GridEvent::Count { pos, role: Role::Forager, count: 1 },
                GridEvent::Pheromone { pos, level: 40 },
                GridEvent::Pheromone { pos, level: 20 },
            ]
        );
    }
}
