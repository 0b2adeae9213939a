//! Terminal reports for colony state and tick events.

use colored::Colorize;
use formica::prelude::*;

/// Per-kind event tallies for one tick.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub hatched: usize,
    pub arrived: usize,
    pub died: usize,
    pub attacks: usize,
    pub kills: usize,
    pub delivered: usize,
    pub discovered: usize,
    pub faults: usize,
}

impl TickSummary {
    pub fn from_events(events: &[ColonyEvent]) -> Self {
        let mut s = Self::default();
        for event in events {
            match event {
                ColonyEvent::Hatched { .. } => s.hatched += 1,
                ColonyEvent::Spawned { .. } => s.arrived += 1,
                ColonyEvent::Died { .. } => s.died += 1,
                ColonyEvent::Attacked { success, .. } => {
                    s.attacks += 1;
                    if *success {
                        s.kills += 1;
                    }
                }
                ColonyEvent::FoodDelivered { .. } => s.delivered += 1,
                ColonyEvent::Discovered { .. } => s.discovered += 1,
                ColonyEvent::AgentFault { .. } => s.faults += 1,
                _ => {}
            }
        }
        s
    }
}

/// One line per tick.
pub fn tick_line(colony: &Colony, events: &[ColonyEvent]) -> String {
    let stats = colony.stats();
    let s = TickSummary::from_events(events);
    format!(
        "{} [{}] food {} | F {} S {} D {} I {} | +{} hatched, {} died, {} delivered, {} revealed, {}/{} strikes",
        format!("tick {:>5}", stats.tick).cyan(),
        stats.clock,
        stats
            .queen_food
            .map(|f| f.to_string())
            .unwrap_or_else(|| "-".to_string()),
        stats.foragers,
        stats.scouts,
        stats.soldiers,
        stats.invaders,
        s.hatched,
        s.died,
        s.delivered,
        s.discovered,
        s.kills,
        s.attacks,
    )
}

/// Closing summary of a colony.
pub fn print_stats(colony: &Colony) {
    let stats = colony.stats();

    println!("{}", "Formica Colony Statistics".white().bold());
    println!("{}", "═".repeat(40).dimmed());
    println!();

    println!("{}", "Time".blue().bold());
    println!("  Ticks:             {}", stats.tick.to_string().cyan());
    println!("  Clock:             {}", stats.clock.as_str().cyan());
    println!();

    println!("{}", "Queen".blue().bold());
    if stats.queen_alive {
        println!("  Status:            {}", "alive".green());
    } else {
        println!("  Status:            {}", "dead".red());
    }
    if let Some(food) = stats.queen_food {
        println!("  Food in nest:      {}", food.to_string().cyan());
    }
    println!();

    println!("{}", "Population".blue().bold());
    println!("  Foragers:          {}", stats.foragers.to_string().cyan());
    println!("  Scouts:            {}", stats.scouts.to_string().cyan());
    println!("  Soldiers:          {}", stats.soldiers.to_string().cyan());
    println!("  Invaders:          {}", stats.invaders.to_string().red());
    println!("  Created / died:    {} / {}", stats.total_created, stats.total_died);
    println!();

    let total = colony.grid().rows() * colony.grid().cols();
    println!("{}", "Territory".blue().bold());
    println!(
        "  Discovered cells:  {} of {} ({:.1}%)",
        stats.discovered_cells.to_string().cyan(),
        total,
        stats.discovered_cells as f64 / total as f64 * 100.0
    );
    println!();
    println!("{}", "═".repeat(40).dimmed());
}

/// Print the colony snapshot as JSON.
pub fn print_json(colony: &Colony) -> anyhow::Result<()> {
    println!("{}", colony.snapshot().to_json()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_event_kinds() {
        let events = vec![
            ColonyEvent::Attacked { attacker: AgentId(1), target: AgentId(2), success: true },
            ColonyEvent::Attacked { attacker: AgentId(1), target: AgentId(3), success: false },
            ColonyEvent::FoodDelivered { forager: AgentId(4), position: CellPos::origin() },
            ColonyEvent::TickComplete { tick: 1, alive: 3, died_this_tick: 0 },
        ];
        let s = TickSummary::from_events(&events);
        assert_eq!(s.attacks, 2);
        assert_eq!(s.kills, 1);
        assert_eq!(s.delivered, 1);
        assert_eq!(s.died, 0);
    }
}
