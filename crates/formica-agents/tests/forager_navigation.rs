//! Forager navigation rules.

use formica_agents::lifecycle::Habitat;
use formica_agents::prelude::*;

/// A 3x3 grid with every cell discovered and the cache refreshed.
fn open_field() -> Grid {
    let mut grid = Grid::headless(3, 3).unwrap();
    grid.reveal_neighborhood(CellPos::new(1, 1)).unwrap();
    grid.refresh();
    grid
}

#[test]
fn single_candidate_is_forced_regardless_of_pheromone() {
    // Corridor: only (0,1) is discovered next to (0,0).
    let mut grid = Grid::headless(2, 2).unwrap();
    grid.set_discovered(CellPos::new(0, 1), true).unwrap();
    grid.refresh();
    grid.set_pheromone(CellPos::new(1, 1), 900).unwrap();

    let forager = Forager::new(AgentId(0), CellPos::origin());
    let mut rng = RandomSource::seeded(7);
    for _ in 0..10 {
        let to = forager.choose_destination(&grid, &mut rng).unwrap();
        assert_eq!(to, CellPos::new(0, 1));
    }
    assert_eq!(rng.draws(), 0);
}

#[test]
fn two_candidates_never_backtrack() {
    // Line of three discovered cells: (0,0) - (0,1) - (0,2).
    let mut grid = Grid::headless(1, 3).unwrap();
    for col in 0..3 {
        grid.set_discovered(CellPos::new(0, col), true).unwrap();
    }
    grid.refresh();

    for (came_from, expected) in [
        (CellPos::new(0, 0), CellPos::new(0, 2)),
        (CellPos::new(0, 2), CellPos::new(0, 0)),
    ] {
        let mut forager = Forager::new(AgentId(1), CellPos::new(0, 1));
        forager.remember(came_from);
        let mut rng = RandomSource::seeded(3);
        let to = forager.choose_destination(&grid, &mut rng).unwrap();
        assert_eq!(to, expected, "came from {}", came_from);
    }
}

#[test]
fn follows_strongest_trail() {
    let mut grid = open_field();
    grid.set_pheromone(CellPos::new(0, 0), 30).unwrap();
    grid.set_pheromone(CellPos::new(2, 2), 80).unwrap();
    grid.set_pheromone(CellPos::new(1, 0), 10).unwrap();

    let mut forager = Forager::new(AgentId(2), CellPos::new(1, 1));
    forager.set_recent_moves(RecentMoves::from_slots([
        CellPos::new(0, 0),
        CellPos::new(0, 1),
        CellPos::new(0, 2),
        CellPos::new(1, 0),
        CellPos::new(1, 2),
        CellPos::new(2, 0),
        CellPos::new(2, 1),
        CellPos::new(1, 1),
    ]));
    let mut rng = RandomSource::scripted([]);
    assert_eq!(
        forager.choose_destination(&grid, &mut rng).unwrap(),
        CellPos::new(2, 2)
    );
    assert_eq!(rng.draws(), 0);
}

#[test]
fn excludes_last_visited_cell_off_the_nest() {
    let mut grid = open_field();
    // The strongest trail leads straight back where the forager came from.
    grid.set_pheromone(CellPos::new(0, 0), 500).unwrap();
    grid.set_pheromone(CellPos::new(0, 2), 20).unwrap();

    let mut forager = Forager::new(AgentId(3), CellPos::new(1, 1));
    forager.remember(CellPos::new(0, 0));
    forager.set_recent_moves(RecentMoves::from_slots([
        CellPos::new(2, 2),
        CellPos::new(2, 1),
        CellPos::new(2, 0),
        CellPos::new(1, 2),
        CellPos::new(1, 0),
        CellPos::new(0, 2),
        CellPos::new(0, 1),
        CellPos::new(0, 0),
    ]));
    let mut rng = RandomSource::scripted([]);
    assert_eq!(
        forager.choose_destination(&grid, &mut rng).unwrap(),
        CellPos::new(0, 2)
    );
}

#[test]
fn loop_detection_overrides_the_trail() {
    let mut grid = open_field();
    grid.set_pheromone(CellPos::new(2, 2), 999).unwrap();

    let a = CellPos::new(1, 1);
    let b = CellPos::new(0, 1);
    let c = CellPos::new(0, 0);
    let d = CellPos::new(1, 0);
    let mut forager = Forager::new(AgentId(4), a);
    forager.set_recent_moves(RecentMoves::from_slots([b, c, d, a, b, c, d, a]));
    assert!(forager.recent_moves().is_looping());

    // Index 1 into the full neighbour list is (0,1).
    let mut rng = RandomSource::scripted([1]);
    let to = forager.choose_destination(&grid, &mut rng).unwrap();
    assert_eq!(to, CellPos::new(0, 1));
    assert_eq!(rng.draws(), 1);
}

#[test]
fn loop_break_draws_from_the_reduced_candidates() {
    let mut grid = open_field();
    grid.set_pheromone(CellPos::new(2, 2), 999).unwrap();

    let a = CellPos::new(1, 1);
    let b = CellPos::new(0, 1);
    let c = CellPos::new(0, 0);
    let d = CellPos::new(1, 0);
    let ring = RecentMoves::from_slots([b, c, d, a, b, c, d, a]);

    // Neighbours of (1,1) in adjacency order, minus the cell it came from.
    let reduced = [
        CellPos::new(0, 0),
        CellPos::new(0, 2),
        CellPos::new(1, 0),
        CellPos::new(1, 2),
        CellPos::new(2, 0),
        CellPos::new(2, 1),
        CellPos::new(2, 2),
    ];

    let picks: Vec<CellPos> = (0..reduced.len() as u32)
        .map(|i| {
            let mut forager = Forager::new(AgentId(5), a);
            forager.remember(b);
            forager.set_recent_moves(ring);
            assert!(forager.recent_moves().is_looping());

            let mut rng = RandomSource::scripted([i]);
            let to = forager.choose_destination(&grid, &mut rng).unwrap();
            assert_eq!(rng.draws(), 1);
            to
        })
        .collect();

    // Index 1 lands on (0,2), not on the excluded (0,1).
    assert_eq!(picks[1], CellPos::new(0, 2));
    assert!(!picks.contains(&b));
    assert_eq!(picks, reduced);
}

#[test]
fn random_walk_without_trails() {
    let grid = open_field();
    let mut forager = Forager::new(AgentId(5), CellPos::new(1, 1));
    forager.remember(CellPos::new(0, 0));
    forager.set_recent_moves(RecentMoves::from_slots([
        CellPos::new(2, 2),
        CellPos::new(2, 1),
        CellPos::new(2, 0),
        CellPos::new(1, 2),
        CellPos::new(1, 0),
        CellPos::new(0, 2),
        CellPos::new(0, 1),
        CellPos::new(0, 0),
    ]));

    // (0,0) is excluded, so index 0 is (0,1).
    let mut rng = RandomSource::scripted([0]);
    assert_eq!(
        forager.choose_destination(&grid, &mut rng).unwrap(),
        CellPos::new(0, 1)
    );
}

#[test]
fn picks_up_food_and_carries_it_home() {
    let mut grid = Grid::headless(1, 3).unwrap();
    let mut registry = AgentRegistry::new();
    let mut rng = RandomSource::scripted([]);
    let mut events = Vec::new();

    let nest = CellPos::new(0, 0);
    let pile = CellPos::new(0, 1);
    grid.set_food(nest, 3).unwrap();
    registry.create(&mut grid, Role::Queen, nest).unwrap();
    grid.set_discovered(pile, true).unwrap();
    grid.set_food(pile, 5).unwrap();
    grid.refresh();

    let id = registry.create(&mut grid, Role::Forager, nest).unwrap();
    let mut forager = registry.take::<Forager>(id).unwrap();

    // Outbound: the only discovered neighbour holds food.
    {
        let mut hab = Habitat::new(&mut grid, &mut registry, &mut rng, &mut events);
        forager.act(&mut hab).unwrap();
    }
    assert_eq!(forager.location(), pile);
    assert!(forager.is_carrying());
    assert_eq!(grid[pile].food(), 4);
    assert_eq!(forager.move_history(), &[nest]);

    // Homeward: lay pheromone, pop the nest, deliver.
    {
        let mut hab = Habitat::new(&mut grid, &mut registry, &mut rng, &mut events);
        forager.act(&mut hab).unwrap();
    }
    assert_eq!(forager.location(), nest);
    assert!(!forager.is_carrying());
    assert_eq!(grid[nest].food(), 4);
    assert_eq!(grid[pile].pheromone(), PHEROMONE_DEPOSIT);
    assert!(events
        .iter()
        .any(|e| matches!(e, AgentEvent::FoodDelivered { forager, .. } if *forager == id)));
}

#[test]
fn pheromone_deposit_is_clamped() {
    let mut grid = Grid::headless(1, 2).unwrap();
    let mut registry = AgentRegistry::new();
    let mut rng = RandomSource::scripted([]);
    let mut events = Vec::new();
    let here = CellPos::new(0, 1);
    grid.set_pheromone(here, 995).unwrap();

    let id = registry.create(&mut grid, Role::Forager, here).unwrap();
    let mut forager = registry.take::<Forager>(id).unwrap();
    forager.load();
    forager.remember(CellPos::origin());

    let mut hab = Habitat::new(&mut grid, &mut registry, &mut rng, &mut events);
    forager.act(&mut hab).unwrap();
    assert_eq!(grid[here].pheromone(), PHEROMONE_MAX);
}
