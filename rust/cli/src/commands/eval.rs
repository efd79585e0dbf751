//! Hand evaluation command.

use crate::error::CliError;
use holdem_engine::cards::{parse_cards, Card};
use holdem_engine::hand::evaluate_hand;
use std::collections::HashSet;
use std::io::Write;

/// Evaluates `hole` (exactly two cards) with `board` (zero to five cards) and
/// prints the category, its numeric value and the kickers.
pub fn handle_eval_command(hole: &str, board: &str, out: &mut dyn Write) -> Result<(), CliError> {
    let hole = parse_cards(hole)?;
    let board = parse_cards(board)?;
    if hole.len() != 2 {
        return Err(CliError::InvalidInput(format!(
            "expected 2 hole cards, got {}",
            hole.len()
        )));
    }
    if board.len() > 5 {
        return Err(CliError::InvalidInput(format!(
            "board holds at most 5 cards, got {}",
            board.len()
        )));
    }
    let mut seen = HashSet::new();
    if let Some(dup) = hole.iter().chain(&board).find(|c| !seen.insert(**c)) {
        return Err(CliError::InvalidInput(format!("duplicate card {}", dup)));
    }

    let strength = evaluate_hand(&hole, &board);
    let kickers: Vec<String> = strength.kickers.iter().map(u8::to_string).collect();
    writeln!(out, "Hand: {} | {}", join(&hole), join(&board))?;
    writeln!(
        out,
        "Category: {} ({})",
        strength.category.name(),
        strength.category.value()
    )?;
    writeln!(out, "Kickers: {}", kickers.join(" "))?;
    Ok(())
}

fn join(cards: &[Card]) -> String {
    cards
        .iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn royal_flush_output() {
        let mut out = Vec::new();
        handle_eval_command("As Ks", "Qs Js 10s 2d 3c", &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Category: Royal Flush (10)"));
        assert!(output.contains("Kickers: 14"));
    }

    #[test]
    fn preflop_pair() {
        let mut out = Vec::new();
        handle_eval_command("7h 7c", "", &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("One Pair (2)"));
    }

    #[test]
    fn rejects_duplicates_and_bad_counts() {
        let mut out = Vec::new();
        assert!(matches!(
            handle_eval_command("As As", "", &mut out),
            Err(CliError::InvalidInput(_))
        ));
        assert!(handle_eval_command("As", "", &mut out).is_err());
        assert!(handle_eval_command("As Kd", "2c 3c 4c 5c 6c 7c", &mut out).is_err());
        assert!(handle_eval_command("Xx Kd", "", &mut out).is_err());
    }
}
