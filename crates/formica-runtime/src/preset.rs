//! Colony presets - the starting population laid out by `initialize`.

use formica_agents::registry::AgentRegistry;
use formica_core::prelude::*;
use serde::{Deserialize, Serialize};

/// How the colony entrance is populated at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColonyPreset {
    /// Food stocked on the queen's cell.
    pub food: u32,
    pub foragers: u32,
    pub scouts: u32,
    pub soldiers: u32,
    /// Reveal the queen's cell and its neighbours.
    pub reveal_neighborhood: bool,
    /// Queen's cell. `None` places her at the colony entrance, one step
    /// past the grid centre.
    pub queen: Option<CellPos>,
}

impl ColonyPreset {
    /// The normal setup: 50 foragers, 4 scouts and 10 soldiers around a
    /// well-stocked queen.
    pub fn standard() -> Self {
        Self {
            food: 1000,
            foragers: 50,
            scouts: 4,
            soldiers: 10,
            reveal_neighborhood: true,
            queen: None,
        }
    }

    /// A lone queen with `food` units to live on.
    pub fn queen_only(food: u32) -> Self {
        Self {
            food,
            foragers: 0,
            scouts: 0,
            soldiers: 0,
            reveal_neighborhood: false,
            queen: None,
        }
    }

    pub fn with_queen_at(mut self, pos: CellPos) -> Self {
        self.queen = Some(pos);
        self
    }

    /// Where the queen will be placed on a `rows` x `cols` grid.
    pub fn queen_position(&self, rows: usize, cols: usize) -> CellPos {
        self.queen.unwrap_or_else(|| {
            CellPos::new(
                (rows / 2 + 1).min(rows.saturating_sub(1)),
                (cols / 2 + 1).min(cols.saturating_sub(1)),
            )
        })
    }

    pub fn validate(&self, rows: usize, cols: usize) -> Result<()> {
        let pos = self.queen_position(rows, cols);
        if pos.row >= rows || pos.col >= cols {
            return Err(FormicaError::invalid_config(
                "preset.queen",
                format!("{} is outside the {}x{} grid", pos, rows, cols),
            ));
        }
        Ok(())
    }

    /// Lay the preset out on `grid`, returning the queen's id.
    pub fn apply(&self, grid: &mut Grid, registry: &mut AgentRegistry) -> Result<AgentId> {
        let pos = self.queen_position(grid.rows(), grid.cols());
        let queen = registry.create(grid, Role::Queen, pos)?;

        for (role, n) in [
            (Role::Forager, self.foragers),
            (Role::Scout, self.scouts),
            (Role::Soldier, self.soldiers),
        ] {
            for _ in 0..n {
                registry.create(grid, role, pos)?;
            }
        }

        grid.set_food(pos, self.food)?;
        if self.reveal_neighborhood {
            grid.reveal_neighborhood(pos)?;
        }
        tracing::debug!(
            queen = %queen,
            cell = %pos,
            agents = registry.len(),
            "colony entrance laid out"
        );
        Ok(queen)
    }
}

impl Default for ColonyPreset {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entrance_sits_past_centre() {
        let preset = ColonyPreset::standard();
        assert_eq!(preset.queen_position(27, 27), CellPos::new(14, 14));
        assert_eq!(preset.queen_position(1, 1), CellPos::new(0, 0));
        assert_eq!(
            preset.with_queen_at(CellPos::new(2, 2)).queen_position(27, 27),
            CellPos::new(2, 2)
        );
    }

    #[test]
    fn standard_layout() {
        let mut grid = Grid::headless(27, 27).unwrap();
        let mut registry = AgentRegistry::new();
        let queen = ColonyPreset::standard().apply(&mut grid, &mut registry).unwrap();

        let nest = CellPos::new(14, 14);
        assert_eq!(registry.queen_id(), Some(queen));
        assert_eq!(grid[nest].food(), 1000);
        assert_eq!(grid[nest].count(Role::Forager), 50);
        assert_eq!(grid[nest].count(Role::Scout), 4);
        assert_eq!(grid[nest].count(Role::Soldier), 10);
        assert_eq!(grid.discovered_count(), 9);
        assert_eq!(registry.len(), 65);
    }

    #[test]
    fn rejects_queen_off_grid() {
        let preset = ColonyPreset::queen_only(5).with_queen_at(CellPos::new(5, 0));
        assert!(matches!(
            preset.validate(5, 5),
            Err(FormicaError::Config { .. })
        ));
    }
}
