use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum GameError {
    #[error("It's not seat {actual}'s turn (expected seat {expected})")]
    NotPlayersTurn { expected: usize, actual: usize },
    #[error("Player already folded")]
    PlayerAlreadyFolded,
    #[error("Player is all-in and cannot act")]
    PlayerAllIn,
    #[error("Cannot check facing a bet of {to_call}")]
    CannotCheck { to_call: u32 },
    #[error("Raise to {amount} is below the minimum of {minimum}")]
    RaiseTooSmall { amount: u32, minimum: u32 },
    #[error("Raise to {amount} exceeds available {available}")]
    InsufficientChips { amount: u32, available: u32 },
    #[error("No hand in progress")]
    NoHandInProgress,
    #[error("A hand is already in progress")]
    HandInProgress,
    #[error("Hand already settled")]
    HandSettled,
    #[error("Betting is closed: only one player remains in the hand")]
    BettingClosed,
    #[error("At least 2 players are required, found {found}")]
    NotEnoughPlayers { found: usize },
    #[error("Seat {seat} has no chips left")]
    BustedPlayer { seat: usize },
    #[error("Deck exhausted: requested {requested}, remaining {remaining}")]
    DeckExhausted { requested: usize, remaining: usize },
    #[error("Board cannot take {requested} more cards (has {current})")]
    BoardFull { current: usize, requested: usize },
    #[error("No player in seat {0}")]
    NoSuchSeat(usize),
    #[error("Name {0:?} is already seated")]
    DuplicateName(String),
    #[error("Table is full ({max_seats} seats)")]
    TableFull { max_seats: usize },
    #[error("Table chip total {total} would exceed {}", u32::MAX)]
    ChipTotalTooLarge { total: u64 },
    #[error("No player named {0:?}")]
    UnknownPlayer(String),
    #[error("Invalid card: {0:?}")]
    InvalidCard(String),
}

impl GameError {
    /// Errors the acting player caused; they may resubmit a different action.
    pub fn is_illegal_action(&self) -> bool {
        matches!(
            self,
            GameError::NotPlayersTurn { .. }
                | GameError::PlayerAlreadyFolded
                | GameError::PlayerAllIn
                | GameError::CannotCheck { .. }
                | GameError::RaiseTooSmall { .. }
                | GameError::InsufficientChips { .. }
        )
    }

    /// Errors that end the hand instead of being retried.
    pub fn is_fatal(&self) -> bool {
        matches!(self, GameError::DeckExhausted { .. })
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
