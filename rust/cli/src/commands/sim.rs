//! Simulation command: play many hands through the table registry.
//!
//! Seats follow a seeded policy (mostly check/call, with occasional folds,
//! minimum raises and shoves) so stacks move and players can bust. The chip
//! total at the table is checked after every hand.

use crate::error::CliError;
use holdem_engine::player::PlayerAction;
use holdem_engine::snapshot::TableSnapshot;
use holdem_tables::{settings, LeaveReason, TableEvent, TableRegistry};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct SimStats {
    hands: u64,
    showdowns: u64,
    uncontested: u64,
    busted: u64,
}

impl SimStats {
    /// Folds one call's events into the totals. Returns true once the table
    /// has closed.
    fn record(&mut self, events: &[TableEvent]) -> bool {
        let mut closed = false;
        for event in events {
            if tracing::enabled!(tracing::Level::TRACE) {
                if let Ok(line) = event.to_json() {
                    tracing::trace!(event = %line, "table event");
                }
            }
            match event {
                TableEvent::HandSettled { showdown, .. } => {
                    self.hands += 1;
                    if *showdown {
                        self.showdowns += 1;
                    } else {
                        self.uncontested += 1;
                    }
                }
                TableEvent::PlayerLeft {
                    reason: LeaveReason::Busted,
                    ..
                } => self.busted += 1,
                TableEvent::TableClosed { .. } => closed = true,
                _ => {}
            }
        }
        closed
    }
}

/// Handle the sim command.
///
/// # Arguments
///
/// * `hands` - Number of hands to play; stops early if the table closes
/// * `players` - Seats at the table
/// * `seed` - Shuffle and policy seed; falls back to configuration, then random
/// * `output` - Append hand records to this JSONL file
pub fn handle_sim_command(
    hands: u64,
    players: usize,
    seed: Option<u64>,
    output: Option<String>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if hands == 0 {
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    let mut settings = settings::load()?;
    if players < 2 || players > settings.table.max_seats {
        return Err(CliError::InvalidInput(format!(
            "players must be between 2 and {}",
            settings.table.max_seats
        )));
    }
    let base_seed = seed
        .or(settings.table.seed)
        .unwrap_or_else(rand::random);
    settings.table.seed = Some(base_seed);
    if let Some(path) = output {
        settings.history_path = Some(PathBuf::from(path));
    }

    let registry = TableRegistry::from_settings(&settings)?;
    let names: Vec<String> = (1..=players).map(|i| format!("P{}", i)).collect();
    let id = registry.create_table(&names[0])?;
    for name in &names[1..] {
        registry.join(&id, name)?;
    }
    let expected = players as u64 * u64::from(settings.table.starting_chips);

    let mut rng = ChaCha20Rng::seed_from_u64(base_seed);
    let mut stats = SimStats::default();
    let mut closed = false;

    while stats.hands < hands && !closed {
        closed = stats.record(&registry.start_hand(&id)?);
        while !closed {
            let snap = registry.snapshot(&id, None)?;
            if !snap.hand_in_progress {
                break;
            }
            let seat = snap
                .current_actor
                .ok_or_else(|| CliError::Engine("hand in progress without an actor".into()))?;
            let action = choose_action(&snap, seat, &mut rng);
            let name = snap.seats[seat].name.clone();
            closed = stats.record(&registry.act(&id, &name, action)?);
        }
        if !closed {
            let total = registry.snapshot(&id, None)?.total_chips();
            if total != expected {
                return Err(CliError::Engine(format!(
                    "chip total {} differs from {} after hand {}",
                    total, expected, stats.hands
                )));
            }
        }
    }

    tracing::info!(seed = base_seed, ?stats, "simulation finished");
    writeln!(out, "Simulated {} hands (seed {})", stats.hands, base_seed)?;
    writeln!(
        out,
        "Showdowns: {}  Uncontested: {}  Busted: {}",
        stats.showdowns, stats.uncontested, stats.busted
    )?;
    if closed {
        writeln!(out, "Table closed: one player left")?;
    } else {
        writeln!(out, "Chips conserved: {}", expected)?;
    }
    Ok(())
}

fn choose_action(snap: &TableSnapshot, seat: usize, rng: &mut ChaCha20Rng) -> PlayerAction {
    let me = &snap.seats[seat];
    let owed = snap.highest_bet.saturating_sub(me.bet);
    let stack_total = me.chips + me.bet;
    let can_raise = me.chips > owed && stack_total >= snap.minimum_raise;

    match rng.random_range(0..100) {
        0..=9 if owed > 0 => PlayerAction::Fold,
        99 if can_raise => PlayerAction::Raise(stack_total),
        88..=98 if can_raise => PlayerAction::Raise(snap.minimum_raise),
        _ if owed > 0 => PlayerAction::Call,
        _ => PlayerAction::Check,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_count_settlements_and_busts() {
        let mut stats = SimStats::default();
        let events = vec![
            TableEvent::HandSettled {
                table_id: "t".into(),
                hand_id: "h".into(),
                payouts: Vec::new(),
                showdown: true,
            },
            TableEvent::PlayerLeft {
                table_id: "t".into(),
                name: "P2".into(),
                reason: LeaveReason::Busted,
            },
        ];
        assert!(!stats.record(&events));
        assert_eq!(stats.hands, 1);
        assert_eq!(stats.showdowns, 1);
        assert_eq!(stats.busted, 1);
        assert!(stats.record(&[TableEvent::TableClosed {
            table_id: "t".into()
        }]));
    }
}
