use std::sync::{Arc, Mutex};

use holdem_engine::config::TableConfig;
use holdem_engine::engine::Engine;
use holdem_engine::errors::GameError;
use holdem_engine::logger::HandLogger;
use holdem_engine::player::PlayerAction;
use holdem_engine::snapshot::TableSnapshot;

use crate::errors::TableError;
use crate::events::{LeaveReason, SeatChange, TableEvent};
use crate::registry::TableId;

pub type SharedHistory = Arc<Mutex<HandLogger>>;

/// One table: an engine plus the roster changes waiting for the hand to end.
///
/// Every method runs to completion and returns the events it produced. The
/// registry holds each table behind its own lock, so calls for one table are
/// applied one at a time.
#[derive(Debug)]
pub struct Table {
    id: TableId,
    config: TableConfig,
    engine: Engine,
    pending: Vec<SeatChange>,
    history: Option<SharedHistory>,
    closed: bool,
}

impl Table {
    pub fn new(
        id: TableId,
        config: TableConfig,
        host: &str,
        history: Option<SharedHistory>,
    ) -> Result<Self, TableError> {
        let mut engine = Engine::new(&config)?;
        engine.add_player(host, config.starting_chips)?;
        Ok(Self {
            id,
            config,
            engine,
            pending: Vec::new(),
            history,
            closed: false,
        })
    }

    pub fn id(&self) -> &TableId {
        &self.id
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn pending(&self) -> &[SeatChange] {
        &self.pending
    }

    pub fn seated(&self) -> usize {
        self.engine.players().len()
    }

    /// Set once the seated count dropped below two; the registry then drops
    /// the table.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn snapshot(&self, viewer: Option<&str>) -> Result<TableSnapshot, TableError> {
        match viewer {
            None => Ok(self.engine.snapshot()),
            Some(name) => {
                let seat = self
                    .engine
                    .seat_of(name)
                    .ok_or_else(|| GameError::UnknownPlayer(name.to_string()))?;
                Ok(self.engine.snapshot_for(seat))
            }
        }
    }

    pub fn join(&mut self, name: &str) -> Result<Vec<TableEvent>, TableError> {
        if self.engine.seat_of(name).is_some() || self.is_queued(name) {
            return Err(GameError::DuplicateName(name.to_string()).into());
        }
        if self.engine.is_hand_in_progress() {
            return Ok(vec![self.queue(SeatChange::Join(name.to_string()))]);
        }
        let seat = self.engine.add_player(name, self.config.starting_chips)?;
        Ok(vec![self.joined(name, seat)])
    }

    pub fn leave(&mut self, name: &str) -> Result<Vec<TableEvent>, TableError> {
        if self.engine.seat_of(name).is_none() {
            // Withdrawing a queued join never reached the engine
            if let Some(pos) = self
                .pending
                .iter()
                .position(|c| *c == SeatChange::Join(name.to_string()))
            {
                self.pending.remove(pos);
                return Ok(Vec::new());
            }
            return Err(GameError::UnknownPlayer(name.to_string()).into());
        }
        if self.engine.is_hand_in_progress() {
            let change = SeatChange::Leave(name.to_string());
            if self.pending.contains(&change) {
                return Ok(Vec::new());
            }
            return Ok(vec![self.queue(change)]);
        }
        let mut events = Vec::new();
        self.remove(name, LeaveReason::Requested, &mut events)?;
        self.close_if_short(&mut events);
        Ok(events)
    }

    pub fn start_hand(&mut self) -> Result<Vec<TableEvent>, TableError> {
        self.engine.start_hand()?;
        let record = self.engine.hand_record();
        let mut events = vec![TableEvent::HandStarted {
            table_id: self.id.clone(),
            hand_id: record.map(|r| r.hand_id).unwrap_or_default(),
            dealer: self.engine.dealer(),
            pot: self.engine.pot(),
        }];
        self.drive(&mut events)?;
        Ok(events)
    }

    /// Applies `name`'s action, then runs the hand forward until someone has
    /// to act again or the hand is over.
    pub fn act(&mut self, name: &str, action: PlayerAction) -> Result<Vec<TableEvent>, TableError> {
        let seat = self
            .engine
            .seat_of(name)
            .ok_or_else(|| GameError::UnknownPlayer(name.to_string()))?;
        self.engine.process_action(seat, action)?;

        let mut events = vec![TableEvent::ActionApplied {
            table_id: self.id.clone(),
            seat,
            name: name.to_string(),
            action,
            pot: self.engine.pot(),
        }];
        self.drive(&mut events)?;
        Ok(events)
    }

    fn drive(&mut self, events: &mut Vec<TableEvent>) -> Result<(), TableError> {
        loop {
            if !self.engine.is_betting_round_complete() {
                if let Some(seat) = self.engine.current_actor() {
                    events.push(TableEvent::TurnChanged {
                        table_id: self.id.clone(),
                        seat,
                        name: self.engine.players()[seat].name().to_string(),
                    });
                }
                return Ok(());
            }
            let next = match self.engine.street().cards_for_next() {
                Some(n) if self.engine.contenders() > 1 => n,
                _ => return self.settle(events),
            };
            match self.engine.deal_community_cards(next) {
                Ok(cards) => events.push(TableEvent::StreetDealt {
                    table_id: self.id.clone(),
                    street: self.engine.street(),
                    cards,
                }),
                Err(err) => {
                    // The engine already refunded and reset; this is a hand boundary
                    let mut discarded = Vec::new();
                    self.apply_pending(&mut discarded)?;
                    return Err(err.into());
                }
            }
        }
    }

    fn settle(&mut self, events: &mut Vec<TableEvent>) -> Result<(), TableError> {
        let payouts = self.engine.award_pot()?;
        let record = self.engine.hand_record();
        self.engine.end_hand()?;

        let showdown = record.as_ref().is_some_and(|r| r.showdown.is_some());
        events.push(TableEvent::HandSettled {
            table_id: self.id.clone(),
            hand_id: record
                .as_ref()
                .map(|r| r.hand_id.clone())
                .unwrap_or_default(),
            payouts,
            showdown,
        });
        tracing::debug!(table_id = %self.id, showdown, "hand settled");

        self.apply_pending(events)?;
        let busted: Vec<String> = self
            .engine
            .players()
            .iter()
            .filter(|p| p.chips() == 0)
            .map(|p| p.name().to_string())
            .collect();
        for name in busted {
            self.remove(&name, LeaveReason::Busted, events)?;
        }
        self.close_if_short(events);

        // Written last so a failed write still leaves the seats consistent
        if let (Some(history), Some(record)) = (&self.history, record) {
            let mut logger = history.lock().map_err(|_| TableError::StoragePoisoned)?;
            logger.write(&record)?;
        }
        Ok(())
    }

    fn apply_pending(&mut self, events: &mut Vec<TableEvent>) -> Result<(), TableError> {
        for change in std::mem::take(&mut self.pending) {
            match change {
                SeatChange::Leave(name) => self.remove(&name, LeaveReason::Requested, events)?,
                SeatChange::Join(name) => {
                    match self.engine.add_player(&name, self.config.starting_chips) {
                        Ok(seat) => events.push(self.joined(&name, seat)),
                        Err(err @ GameError::TableFull { .. }) => {
                            tracing::warn!(table_id = %self.id, name = %name, error = %err, "queued join dropped");
                        }
                        Err(err) => return Err(err.into()),
                    }
                }
            }
        }
        self.close_if_short(events);
        Ok(())
    }

    fn remove(
        &mut self,
        name: &str,
        reason: LeaveReason,
        events: &mut Vec<TableEvent>,
    ) -> Result<(), TableError> {
        let player = self.engine.remove_player(name)?;
        tracing::debug!(table_id = %self.id, name, chips = player.chips(), ?reason, "player left");
        events.push(TableEvent::PlayerLeft {
            table_id: self.id.clone(),
            name: name.to_string(),
            reason,
        });
        Ok(())
    }

    fn close_if_short(&mut self, events: &mut Vec<TableEvent>) {
        if !self.closed && self.seated() < 2 {
            self.closed = true;
            tracing::info!(table_id = %self.id, seated = self.seated(), "table closed");
            events.push(TableEvent::TableClosed {
                table_id: self.id.clone(),
            });
        }
    }

    fn is_queued(&self, name: &str) -> bool {
        self.pending
            .iter()
            .any(|c| matches!(c, SeatChange::Join(n) if n == name))
    }

    fn queue(&mut self, change: SeatChange) -> TableEvent {
        tracing::debug!(table_id = %self.id, ?change, "seat change queued");
        self.pending.push(change.clone());
        TableEvent::SeatChangeQueued {
            table_id: self.id.clone(),
            change,
        }
    }

    fn joined(&self, name: &str, seat: usize) -> TableEvent {
        TableEvent::PlayerJoined {
            table_id: self.id.clone(),
            name: name.to_string(),
            seat,
            chips: self.config.starting_chips,
        }
    }
}
