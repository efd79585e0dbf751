//! Deal command: start a single hand and show the table.

use crate::error::CliError;
use holdem_engine::engine::Engine;
use holdem_tables::settings;
use std::io::Write;

/// Seats `players` players with the configured starting stack, starts one
/// hand and prints the full snapshot (every hole card visible) as JSON.
pub fn handle_deal_command(
    seed: Option<u64>,
    players: usize,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let mut config = settings::load()?.table;
    if players < 2 || players > config.max_seats {
        return Err(CliError::InvalidInput(format!(
            "players must be between 2 and {}",
            config.max_seats
        )));
    }
    config.seed = Some(seed.or(config.seed).unwrap_or_else(rand::random));

    let mut eng = Engine::new(&config).map_err(|e| CliError::Config(e.to_string()))?;
    for i in 1..=players {
        eng.add_player(&format!("P{}", i), config.starting_chips)?;
    }
    eng.start_hand()?;

    let json = serde_json::to_string_pretty(&eng.snapshot()).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json)?;
    Ok(())
}
