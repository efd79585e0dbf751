use holdem_engine::cards::Card;
use holdem_engine::game::Street;
use holdem_engine::player::PlayerAction;
use holdem_engine::pot::Payout;
use serde::{Deserialize, Serialize};

use crate::registry::TableId;

/// Roster change waiting for the current hand to finish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum SeatChange {
    Join(String),
    Leave(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveReason {
    Requested,
    Busted,
}

/// What happened at a table as the result of one call. A session layer
/// forwards these to its clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TableEvent {
    PlayerJoined {
        table_id: TableId,
        name: String,
        seat: usize,
        chips: u32,
    },
    SeatChangeQueued {
        table_id: TableId,
        change: SeatChange,
    },
    PlayerLeft {
        table_id: TableId,
        name: String,
        reason: LeaveReason,
    },
    HandStarted {
        table_id: TableId,
        hand_id: String,
        dealer: usize,
        pot: u32,
    },
    TurnChanged {
        table_id: TableId,
        seat: usize,
        name: String,
    },
    ActionApplied {
        table_id: TableId,
        seat: usize,
        name: String,
        action: PlayerAction,
        pot: u32,
    },
    StreetDealt {
        table_id: TableId,
        street: Street,
        cards: Vec<Card>,
    },
    HandSettled {
        table_id: TableId,
        hand_id: String,
        payouts: Vec<Payout>,
        showdown: bool,
    },
    TableClosed {
        table_id: TableId,
    },
}

impl TableEvent {
    pub fn table_id(&self) -> &str {
        match self {
            TableEvent::PlayerJoined { table_id, .. }
            | TableEvent::SeatChangeQueued { table_id, .. }
            | TableEvent::PlayerLeft { table_id, .. }
            | TableEvent::HandStarted { table_id, .. }
            | TableEvent::TurnChanged { table_id, .. }
            | TableEvent::ActionApplied { table_id, .. }
            | TableEvent::StreetDealt { table_id, .. }
            | TableEvent::HandSettled { table_id, .. }
            | TableEvent::TableClosed { table_id } => table_id,
        }
    }

    /// Short event name, matching the serialized `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            TableEvent::PlayerJoined { .. } => "player_joined",
            TableEvent::SeatChangeQueued { .. } => "seat_change_queued",
            TableEvent::PlayerLeft { .. } => "player_left",
            TableEvent::HandStarted { .. } => "hand_started",
            TableEvent::TurnChanged { .. } => "turn_changed",
            TableEvent::ActionApplied { .. } => "action_applied",
            TableEvent::StreetDealt { .. } => "street_dealt",
            TableEvent::HandSettled { .. } => "hand_settled",
            TableEvent::TableClosed { .. } => "table_closed",
        }
    }

    /// Single-line JSON form, as forwarded to subscribers.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
