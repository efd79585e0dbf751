use crate::cards::Card;
use serde::{Deserialize, Serialize};

/// A player's intent for their turn. `Raise` carries the new total street bet
/// ("raise to"), not the increment.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "amount", rename_all = "snake_case")]
pub enum PlayerAction {
    /// Fold and forfeit the hand
    Fold,
    /// Check (only valid when already matching the highest bet)
    Check,
    /// Match the highest bet, or go all-in trying
    Call,
    /// Raise the street bet to the given total
    Raise(u32),
}

/// Per-seat state. Chips persist across hands; everything else is reset by
/// [`Player::clear_hand`] at the start of each hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    chips: u32,
    hand: Vec<Card>,
    /// Chips in front of the player on the current street
    bet: u32,
    /// Chips put in over the whole hand
    committed: u32,
    folded: bool,
    all_in: bool,
}

impl Player {
    pub fn new(name: impl Into<String>, chips: u32) -> Self {
        Self {
            name: name.into(),
            chips,
            hand: Vec::with_capacity(2),
            bet: 0,
            committed: 0,
            folded: false,
            all_in: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn chips(&self) -> u32 {
        self.chips
    }
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }
    pub fn bet(&self) -> u32 {
        self.bet
    }
    pub fn committed(&self) -> u32 {
        self.committed
    }
    pub fn is_folded(&self) -> bool {
        self.folded
    }
    pub fn is_all_in(&self) -> bool {
        self.all_in
    }

    /// Still able to take a turn this street.
    pub fn can_act(&self) -> bool {
        !self.folded && !self.all_in
    }

    pub fn receive_cards(&mut self, cards: Vec<Card>) {
        self.hand = cards;
    }

    /// Moves `min(amount, chips)` from the stack into the street bet and
    /// returns what actually moved.
    pub fn place_bet(&mut self, amount: u32) -> u32 {
        let moved = amount.min(self.chips);
        self.chips -= moved;
        self.bet += moved;
        self.committed += moved;
        if self.chips == 0 {
            self.all_in = true;
        }
        moved
    }

    pub fn fold(&mut self) {
        self.folded = true;
    }

    pub fn reset_bet(&mut self) {
        self.bet = 0;
    }

    pub fn add_chips(&mut self, amount: u32) {
        self.chips = self.chips.saturating_add(amount);
    }

    /// Returns this hand's contributions to the stack. Used when a hand is
    /// aborted; the caller is responsible for removing them from the pot.
    pub(crate) fn refund_committed(&mut self) -> u32 {
        let refund = self.committed;
        self.chips = self.chips.saturating_add(refund);
        self.committed = 0;
        self.bet = 0;
        refund
    }

    pub fn clear_hand(&mut self) {
        self.hand.clear();
        self.bet = 0;
        self.committed = 0;
        self.folded = false;
        self.all_in = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_bet_caps_at_stack_and_marks_all_in() {
        let mut p = Player::new("alice", 30);
        assert_eq!(p.place_bet(10), 10);
        assert!(!p.is_all_in());
        assert_eq!(p.place_bet(50), 20);
        assert_eq!(p.chips(), 0);
        assert_eq!(p.bet(), 30);
        assert!(p.is_all_in());
        assert!(!p.can_act());
    }

    #[test]
    fn clear_hand_keeps_chips() {
        let mut p = Player::new("bob", 100);
        p.place_bet(40);
        p.fold();
        p.clear_hand();
        assert_eq!(p.chips(), 60);
        assert_eq!(p.bet(), 0);
        assert_eq!(p.committed(), 0);
        assert!(!p.is_folded());
        assert!(p.hand().is_empty());
    }

    #[test]
    fn refund_restores_committed_chips() {
        let mut p = Player::new("carol", 100);
        p.place_bet(25);
        p.reset_bet();
        p.place_bet(15);
        assert_eq!(p.refund_committed(), 40);
        assert_eq!(p.chips(), 100);
    }
}
