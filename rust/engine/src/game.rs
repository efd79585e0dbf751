use serde::{Deserialize, Serialize};

/// Represents a betting street in Texas Hold'em poker.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Street {
    /// Before flop (hole cards dealt)
    Preflop,
    /// After flop (3 community cards)
    Flop,
    /// After turn (4th community card)
    Turn,
    /// After river (5th community card)
    River,
}

impl Street {
    /// Street counter as used on the wire: 0 = preflop .. 3 = river.
    pub fn index(self) -> u8 {
        match self {
            Street::Preflop => 0,
            Street::Flop => 1,
            Street::Turn => 2,
            Street::River => 3,
        }
    }

    pub fn next(self) -> Option<Street> {
        match self {
            Street::Preflop => Some(Street::Flop),
            Street::Flop => Some(Street::Turn),
            Street::Turn => Some(Street::River),
            Street::River => None,
        }
    }

    /// Community cards dealt when moving onto the street after this one.
    pub fn cards_for_next(self) -> Option<usize> {
        match self {
            Street::Preflop => Some(3),
            Street::Flop | Street::Turn => Some(1),
            Street::River => None,
        }
    }
}

/// Where a table is in its hand lifecycle.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "street", rename_all = "snake_case")]
pub enum Phase {
    /// No hand running; seats may change
    Idle,
    /// Betting on the given street
    InHand(Street),
    /// Pot awarded, waiting for `end_hand`
    Settled,
}
