use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::game::Street;
use crate::player::Player;

/// Public view of one seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatSnapshot {
    pub name: String,
    pub chips: u32,
    pub bet: u32,
    /// Empty when the seat folded or the viewer may not see it
    pub hand: Vec<Card>,
    pub is_current: bool,
    pub folded: bool,
    pub all_in: bool,
}

impl SeatSnapshot {
    pub(crate) fn from_player(player: &Player, is_current: bool, reveal: bool) -> Self {
        let hand = if reveal && !player.is_folded() {
            player.hand().to_vec()
        } else {
            Vec::new()
        };
        Self {
            name: player.name().to_string(),
            chips: player.chips(),
            bet: player.bet(),
            hand,
            is_current,
            folded: player.is_folded(),
            all_in: player.is_all_in(),
        }
    }
}

/// Read-only table state handed to the session layer after every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub pot: u32,
    pub community_cards: Vec<Card>,
    pub seats: Vec<SeatSnapshot>,
    pub dealer: usize,
    pub current_actor: Option<usize>,
    /// `None` between hands
    pub street: Option<Street>,
    pub highest_bet: u32,
    /// Smallest legal "raise to" for the current actor
    pub minimum_raise: u32,
    pub hand_in_progress: bool,
}

impl TableSnapshot {
    pub fn seat(&self, name: &str) -> Option<&SeatSnapshot> {
        self.seats.iter().find(|s| s.name == name)
    }

    pub fn total_chips(&self) -> u64 {
        self.seats.iter().map(|s| u64::from(s.chips)).sum::<u64>() + u64::from(self.pot)
    }
}
