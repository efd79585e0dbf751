use crate::cards::Card;
use crate::config::TableConfig;
use crate::deck::Deck;
use crate::errors::{ConfigError, GameError};
use crate::game::{Phase, Street};
use crate::hand::{evaluate_hand, HandStrength};
use crate::logger::{format_hand_id, today, ActionRecord, HandRecord, ShowdownInfo, ShownHand};
use crate::player::{Player, PlayerAction};
use crate::pot::{split_pot, Payout};
use crate::rules::{self, validate_action, BettingContext, ValidatedAction};
use crate::snapshot::{SeatSnapshot, TableSnapshot};
use crate::turn::{blind_seats, first_eligible_from, next_eligible};

/// Rules engine for one table. Owns the deck, the seated players and every
/// per-hand tracker; performs no I/O and never blocks.
///
/// Callers drive a hand as: [`Engine::start_hand`], then repeatedly
/// [`Engine::process_action`] until [`Engine::is_betting_round_complete`],
/// then either [`Engine::deal_community_cards`] or [`Engine::award_pot`],
/// and finally [`Engine::end_hand`].
///
/// # Examples
///
/// ```
/// use holdem_engine::config::TableConfig;
/// use holdem_engine::engine::Engine;
/// use holdem_engine::player::PlayerAction;
///
/// let mut engine = Engine::new(&TableConfig { seed: Some(7), ..TableConfig::default() }).unwrap();
/// engine.add_player("alice", 1000).unwrap();
/// engine.add_player("bob", 1000).unwrap();
/// engine.start_hand().unwrap();
///
/// // Heads-up: the dealer posts the small blind and acts first
/// assert_eq!(engine.pot(), 15);
/// engine.process_action(0, PlayerAction::Call).unwrap();
/// assert!(engine.is_betting_round_complete());
/// engine.deal_community_cards(3).unwrap();
/// assert_eq!(engine.current_actor(), Some(1));
/// ```
#[derive(Debug)]
pub struct Engine {
    deck: Deck,
    seed: u64,
    players: Vec<Player>,
    board: Vec<Card>,
    pot: u32,
    small_blind: u32,
    big_blind: u32,
    max_seats: usize,
    dealer: usize,
    current: usize,
    street: Street,
    /// Accepted actions on this street
    actions_taken: usize,
    /// Seats that have acted since the street opened or since the last raise
    acted: Vec<bool>,
    last_aggressor: Option<usize>,
    in_progress: bool,
    settled: bool,
    hand_seq: u32,
    hand_id: Option<String>,
    hand_dealer: usize,
    actions: Vec<ActionRecord>,
    payouts: Vec<Payout>,
    showdown: Option<ShowdownInfo>,
}

impl Engine {
    pub fn new(config: &TableConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        Ok(Self {
            deck: Deck::new_with_seed(seed),
            seed,
            players: Vec::with_capacity(config.max_seats),
            board: Vec::with_capacity(5),
            pot: 0,
            small_blind: config.small_blind,
            big_blind: config.big_blind,
            max_seats: config.max_seats,
            dealer: 0,
            current: 0,
            street: Street::Preflop,
            actions_taken: 0,
            acted: Vec::new(),
            last_aggressor: None,
            in_progress: false,
            settled: false,
            hand_seq: 0,
            hand_id: None,
            hand_dealer: 0,
            actions: Vec::new(),
            payouts: Vec::new(),
            showdown: None,
        })
    }

    // ---- roster -------------------------------------------------------

    /// Seats a new player at the end of the roster and returns their seat.
    pub fn add_player(&mut self, name: &str, chips: u32) -> Result<usize, GameError> {
        if self.in_progress {
            return Err(GameError::HandInProgress);
        }
        if self.seat_of(name).is_some() {
            return Err(GameError::DuplicateName(name.to_string()));
        }
        if self.players.len() >= self.max_seats {
            return Err(GameError::TableFull {
                max_seats: self.max_seats,
            });
        }
        // Every chip on the table must fit in the pot
        let total = self
            .players
            .iter()
            .map(|p| u64::from(p.chips()))
            .sum::<u64>()
            + u64::from(chips);
        if total > u64::from(u32::MAX) {
            return Err(GameError::ChipTotalTooLarge { total });
        }
        self.players.push(Player::new(name, chips));
        Ok(self.players.len() - 1)
    }

    /// Removes a player between hands. Seats after it shift down by one; the
    /// dealer button stays with the same player where possible.
    pub fn remove_player(&mut self, name: &str) -> Result<Player, GameError> {
        if self.in_progress {
            return Err(GameError::HandInProgress);
        }
        let seat = self
            .seat_of(name)
            .ok_or_else(|| GameError::UnknownPlayer(name.to_string()))?;
        let player = self.players.remove(seat);
        if seat < self.dealer {
            self.dealer -= 1;
        }
        if self.dealer >= self.players.len() {
            self.dealer = 0;
        }
        Ok(player)
    }

    pub fn seat_of(&self, name: &str) -> Option<usize> {
        self.players.iter().position(|p| p.name() == name)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, seat: usize) -> Option<&Player> {
        self.players.get(seat)
    }

    // ---- accessors ----------------------------------------------------

    pub fn pot(&self) -> u32 {
        self.pot
    }
    pub fn board(&self) -> &[Card] {
        &self.board
    }
    pub fn dealer(&self) -> usize {
        self.dealer
    }
    pub fn small_blind(&self) -> u32 {
        self.small_blind
    }
    pub fn big_blind(&self) -> u32 {
        self.big_blind
    }
    pub fn seed(&self) -> u64 {
        self.seed
    }
    pub fn street(&self) -> Street {
        self.street
    }
    pub fn actions_taken(&self) -> usize {
        self.actions_taken
    }
    pub fn last_aggressor(&self) -> Option<usize> {
        self.last_aggressor
    }
    pub fn is_hand_in_progress(&self) -> bool {
        self.in_progress
    }
    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }
    pub fn payouts(&self) -> &[Payout] {
        &self.payouts
    }

    pub fn phase(&self) -> Phase {
        match (self.in_progress, self.settled) {
            (false, _) => Phase::Idle,
            (true, false) => Phase::InHand(self.street),
            (true, true) => Phase::Settled,
        }
    }

    /// Seat expected to act, while a hand is being bet. `None` once nobody
    /// left in the hand can act (everyone still holding cards is all-in).
    pub fn current_actor(&self) -> Option<usize> {
        if !self.in_progress || self.settled {
            return None;
        }
        self.players
            .get(self.current)
            .filter(|p| p.can_act())
            .map(|_| self.current)
    }

    /// Largest bet in front of any seat on the current street.
    pub fn highest_bet(&self) -> u32 {
        self.players.iter().map(Player::bet).max().unwrap_or(0)
    }

    /// Smallest legal "raise to" for the current actor.
    pub fn min_raise(&self) -> u32 {
        match self.current_actor().and_then(|seat| self.players.get(seat)) {
            Some(actor) => rules::min_raise(&self.betting_context(), actor.bet()),
            None => self.big_blind,
        }
    }

    /// Players still holding cards.
    pub fn contenders(&self) -> usize {
        self.players.iter().filter(|p| !p.is_folded()).count()
    }

    fn betting_context(&self) -> BettingContext {
        BettingContext {
            street: self.street,
            highest_bet: self.highest_bet(),
            big_blind: self.big_blind,
            raised: self.last_aggressor.is_some(),
        }
    }

    fn first_eligible(&self, from: usize) -> usize {
        let players = &self.players;
        first_eligible_from(players.len(), from, |s| players[s].can_act()).unwrap_or(from)
    }

    // ---- hand lifecycle -----------------------------------------------

    /// Shuffles, posts blinds and deals hole cards.
    pub fn start_hand(&mut self) -> Result<(), GameError> {
        if self.in_progress {
            return Err(GameError::HandInProgress);
        }
        let n = self.players.len();
        if n < 2 {
            return Err(GameError::NotEnoughPlayers { found: n });
        }
        if let Some(seat) = self.players.iter().position(|p| p.chips() == 0) {
            return Err(GameError::BustedPlayer { seat });
        }
        if n * 2 > 52 {
            return Err(GameError::DeckExhausted {
                requested: n * 2,
                remaining: 52,
            });
        }

        self.dealer %= n;
        self.deck.reset();
        self.board.clear();
        self.pot = 0;
        self.street = Street::Preflop;
        self.reset_street_trackers();
        self.actions.clear();
        self.payouts.clear();
        self.showdown = None;
        for p in &mut self.players {
            p.clear_hand();
        }

        let (sb, bb) = blind_seats(n, self.dealer);
        self.pot += self.players[sb].place_bet(self.small_blind);
        self.pot += self.players[bb].place_bet(self.big_blind);

        for seat in 0..n {
            match self.deck.deal(2) {
                Ok(cards) => self.players[seat].receive_cards(cards),
                Err(e) => {
                    self.abort_hand();
                    return Err(e);
                }
            }
        }

        // The forced big blind stands as the big blind's preflop action.
        if self.players[bb].can_act() {
            self.acted[bb] = true;
            self.actions_taken = 1;
        }

        let first = if n == 2 { sb } else { (bb + 1) % n };
        self.current = self.first_eligible(first);
        self.in_progress = true;
        self.settled = false;
        self.hand_seq += 1;
        self.hand_id = Some(format_hand_id(&today(), self.hand_seq));
        self.hand_dealer = self.dealer;

        tracing::debug!(
            hand = self.hand_seq,
            dealer = self.dealer,
            small_blind_seat = sb,
            big_blind_seat = bb,
            first_actor = self.current,
            pot = self.pot,
            "hand started"
        );
        Ok(())
    }

    /// Applies `action` for `seat`. Rejected actions leave the engine untouched.
    pub fn process_action(&mut self, seat: usize, action: PlayerAction) -> Result<(), GameError> {
        let result = self.try_process_action(seat, action);
        if let Err(err) = &result {
            tracing::debug!(seat, ?action, error = %err, "action rejected");
        }
        result
    }

    fn try_process_action(&mut self, seat: usize, action: PlayerAction) -> Result<(), GameError> {
        if !self.in_progress {
            return Err(GameError::NoHandInProgress);
        }
        if self.settled {
            return Err(GameError::HandSettled);
        }
        let actor = self.players.get(seat).ok_or(GameError::NoSuchSeat(seat))?;
        if seat != self.current {
            return Err(GameError::NotPlayersTurn {
                expected: self.current,
                actual: seat,
            });
        }
        if actor.is_folded() {
            return Err(GameError::PlayerAlreadyFolded);
        }
        if actor.is_all_in() {
            return Err(GameError::PlayerAllIn);
        }
        if self.contenders() <= 1 {
            return Err(GameError::BettingClosed);
        }

        let validated = validate_action(actor.chips(), actor.bet(), &self.betting_context(), action)?;
        match validated {
            ValidatedAction::Fold => self.players[seat].fold(),
            ValidatedAction::Check => {}
            ValidatedAction::Call(amount) => {
                self.pot += self.players[seat].place_bet(amount);
            }
            ValidatedAction::Raise { moved, .. } => {
                self.pot += self.players[seat].place_bet(moved);
                self.last_aggressor = Some(seat);
                self.acted.iter_mut().for_each(|a| *a = false);
            }
        }
        self.acted[seat] = true;
        self.actions_taken += 1;
        self.actions.push(ActionRecord {
            seat,
            street: self.street,
            action,
        });

        let players = &self.players;
        self.current = next_eligible(players.len(), seat, |s| players[s].can_act()).unwrap_or(seat);

        tracing::debug!(
            seat,
            ?action,
            street = ?self.street,
            pot = self.pot,
            next = self.current,
            "action applied"
        );
        Ok(())
    }

    /// Whether the current street needs no further action.
    ///
    /// Complete when at most one player still holds cards, or when every
    /// player able to act has matched the highest bet and has acted since the
    /// street opened or since the last raise. A lone player able to act is
    /// only done once they are not behind the highest bet.
    ///
    /// Tracks who has acted per seat rather than counting actions, so a fold
    /// never stands in for another seat's check or call.
    pub fn is_betting_round_complete(&self) -> bool {
        if !self.in_progress || self.settled {
            return true;
        }
        if self.contenders() <= 1 {
            return true;
        }
        let highest = self.highest_bet();
        let active: Vec<usize> = (0..self.players.len())
            .filter(|&s| self.players[s].can_act())
            .collect();
        match active.as_slice() {
            [] => true,
            [only] => self.players[*only].bet() >= highest,
            many => many
                .iter()
                .all(|&s| self.players[s].bet() == highest && self.acted[s]),
        }
    }

    /// Puts `n` cards on the board and opens the next street.
    pub fn deal_community_cards(&mut self, n: usize) -> Result<Vec<Card>, GameError> {
        if !self.in_progress {
            return Err(GameError::NoHandInProgress);
        }
        if self.settled {
            return Err(GameError::HandSettled);
        }
        let full = GameError::BoardFull {
            current: self.board.len(),
            requested: n,
        };
        let next = self.street.next().ok_or_else(|| full.clone())?;
        if self.board.len() + n > 5 {
            return Err(full);
        }
        let cards = match self.deck.deal(n) {
            Ok(cards) => cards,
            Err(e) => {
                tracing::warn!(error = %e, "deck exhausted, aborting hand");
                self.abort_hand();
                return Err(e);
            }
        };

        self.board.extend_from_slice(&cards);
        for p in &mut self.players {
            p.reset_bet();
        }
        self.reset_street_trackers();
        self.street = next;

        let n_seats = self.players.len();
        let first = if n_seats == 2 {
            (self.dealer + 1) % 2
        } else {
            (self.dealer + 1) % n_seats
        };
        self.current = self.first_eligible(first);

        tracing::debug!(
            street = ?self.street,
            board = ?self.board,
            first_actor = self.current,
            "community cards dealt"
        );
        Ok(cards)
    }

    /// Every contender's hand strength, strongest first. Ties keep seat order.
    pub fn evaluate_hands(&self) -> Vec<(usize, HandStrength)> {
        let mut evaluated: Vec<(usize, HandStrength)> = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.is_folded())
            .map(|(seat, p)| (seat, evaluate_hand(p.hand(), &self.board)))
            .collect();
        evaluated.sort_by(|a, b| b.1.cmp(&a.1));
        evaluated
    }

    /// Seats sharing the best hand among contenders.
    pub fn get_winners(&self) -> Vec<usize> {
        let evaluated = self.evaluate_hands();
        let Some((_, best)) = evaluated.first() else {
            return Vec::new();
        };
        let best = best.clone();
        let mut winners: Vec<usize> = evaluated
            .into_iter()
            .filter(|(_, hs)| *hs == best)
            .map(|(seat, _)| seat)
            .collect();
        winners.sort_unstable();
        winners
    }

    /// Settles the pot. A lone contender takes it without a showdown;
    /// otherwise the best hands split it (see [`split_pot`]).
    pub fn award_pot(&mut self) -> Result<Vec<Payout>, GameError> {
        if !self.in_progress {
            return Err(GameError::NoHandInProgress);
        }
        if self.settled {
            return Err(GameError::HandSettled);
        }

        let contenders: Vec<usize> = (0..self.players.len())
            .filter(|&s| !self.players[s].is_folded())
            .collect();
        let winners = if contenders.len() > 1 {
            let winners = self.get_winners();
            let hands = self
                .evaluate_hands()
                .into_iter()
                .map(|(seat, hs)| ShownHand {
                    seat,
                    cards: self.players[seat].hand().to_vec(),
                    category: hs.category,
                    kickers: hs.kickers,
                })
                .collect();
            self.showdown = Some(ShowdownInfo {
                winners: winners.clone(),
                hands,
            });
            winners
        } else {
            contenders
        };

        let payouts = split_pot(self.pot, &winners, self.dealer, self.players.len());
        for payout in &payouts {
            self.players[payout.seat].add_chips(payout.amount);
        }
        for p in &mut self.players {
            p.reset_bet();
        }
        tracing::debug!(pot = self.pot, ?payouts, showdown = self.showdown.is_some(), "pot awarded");
        self.pot = 0;
        self.settled = true;
        self.payouts = payouts.clone();
        Ok(payouts)
    }

    /// Abandons the current hand: committed chips go back to their owners and
    /// the engine returns to idle without moving the dealer.
    pub fn abort_hand(&mut self) {
        let mut refunded = 0u32;
        for p in &mut self.players {
            refunded += p.refund_committed();
            p.clear_hand();
        }
        tracing::warn!(pot = self.pot, refunded, "hand aborted");
        self.pot = 0;
        self.board.clear();
        self.in_progress = false;
        self.settled = false;
        self.street = Street::Preflop;
        self.reset_street_trackers();
    }

    /// Closes the hand and moves the dealer button one seat forward. An
    /// unsettled pot is awarded first so no chips are lost.
    pub fn end_hand(&mut self) -> Result<(), GameError> {
        if !self.in_progress {
            return Err(GameError::NoHandInProgress);
        }
        if !self.settled {
            tracing::debug!("ending unsettled hand, awarding pot first");
            self.award_pot()?;
        }
        self.dealer = (self.dealer + 1) % self.players.len();
        self.in_progress = false;
        self.settled = false;
        self.street = Street::Preflop;
        self.reset_street_trackers();
        tracing::debug!(hand = self.hand_seq, next_dealer = self.dealer, "hand ended");
        Ok(())
    }

    fn reset_street_trackers(&mut self) {
        self.actions_taken = 0;
        self.last_aggressor = None;
        self.acted = vec![false; self.players.len()];
    }

    // ---- views --------------------------------------------------------

    /// Snapshot with every contender's hole cards visible.
    pub fn snapshot(&self) -> TableSnapshot {
        self.build_snapshot(|_| true)
    }

    /// Snapshot for one seat: other seats' hole cards stay hidden unless the
    /// last hand went to showdown, in which case they stay face up until the
    /// next [`Engine::start_hand`].
    pub fn snapshot_for(&self, viewer: usize) -> TableSnapshot {
        let shown = self.showdown.is_some();
        self.build_snapshot(|seat| seat == viewer || shown)
    }

    fn build_snapshot<F>(&self, reveal: F) -> TableSnapshot
    where
        F: Fn(usize) -> bool,
    {
        let current = self.current_actor();
        TableSnapshot {
            pot: self.pot,
            community_cards: self.board.clone(),
            seats: self
                .players
                .iter()
                .enumerate()
                .map(|(seat, p)| SeatSnapshot::from_player(p, current == Some(seat), reveal(seat)))
                .collect(),
            dealer: self.dealer,
            current_actor: current,
            street: self.in_progress.then_some(self.street),
            highest_bet: self.highest_bet(),
            minimum_raise: self.min_raise(),
            hand_in_progress: self.in_progress,
        }
    }

    /// History record of the current or most recent hand.
    pub fn hand_record(&self) -> Option<HandRecord> {
        let hand_id = self.hand_id.clone()?;
        Some(HandRecord {
            hand_id,
            seed: self.seed,
            dealer: self.hand_dealer,
            players: self.players.iter().map(|p| p.name().to_string()).collect(),
            actions: self.actions.clone(),
            board: self.board.clone(),
            payouts: self.payouts.clone(),
            showdown: self.showdown.clone(),
            ts: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(n: usize, chips: u32) -> Engine {
        let mut e = Engine::new(&TableConfig {
            seed: Some(42),
            ..TableConfig::default()
        })
        .unwrap();
        for i in 0..n {
            e.add_player(&format!("p{}", i), chips).unwrap();
        }
        e
    }

    #[test]
    fn three_handed_blinds_and_first_actor() {
        let mut e = table(3, 1000);
        e.start_hand().unwrap();
        assert_eq!(e.players()[1].bet(), 5);
        assert_eq!(e.players()[2].bet(), 10);
        assert_eq!(e.current_actor(), Some(0));
        assert_eq!(e.phase(), Phase::InHand(Street::Preflop));
    }

    #[test]
    fn roster_is_frozen_mid_hand() {
        let mut e = table(2, 1000);
        e.start_hand().unwrap();
        assert_eq!(e.add_player("late", 1000), Err(GameError::HandInProgress));
        assert_eq!(e.remove_player("p0").unwrap_err(), GameError::HandInProgress);
    }

    #[test]
    fn duplicate_names_and_full_tables_are_rejected() {
        let mut e = table(6, 1000);
        assert_eq!(e.add_player("p0", 10), Err(GameError::DuplicateName("p0".into())));
        assert_eq!(e.add_player("p6", 10), Err(GameError::TableFull { max_seats: 6 }));
    }

    #[test]
    fn removing_before_dealer_keeps_button_on_same_player() {
        let mut e = table(4, 1000);
        e.dealer = 2;
        e.remove_player("p0").unwrap();
        assert_eq!(e.dealer(), 1);
        assert_eq!(e.players()[e.dealer()].name(), "p2");
    }

    #[test]
    fn aborted_hand_refunds_everyone() {
        let mut e = table(3, 1000);
        e.start_hand().unwrap();
        e.process_action(0, PlayerAction::Raise(40)).unwrap();
        e.abort_hand();
        assert!(e.players().iter().all(|p| p.chips() == 1000));
        assert_eq!(e.pot(), 0);
        assert_eq!(e.phase(), Phase::Idle);
        assert_eq!(e.dealer(), 0);
    }

    #[test]
    fn river_is_the_last_street() {
        let mut e = table(2, 1000);
        e.start_hand().unwrap();
        e.deal_community_cards(3).unwrap();
        e.deal_community_cards(1).unwrap();
        e.deal_community_cards(1).unwrap();
        assert_eq!(e.street(), Street::River);
        assert!(matches!(
            e.deal_community_cards(1),
            Err(GameError::BoardFull { current: 5, .. })
        ));
    }

    #[test]
    fn settled_hand_refuses_actions() {
        let mut e = table(2, 1000);
        e.start_hand().unwrap();
        e.process_action(0, PlayerAction::Fold).unwrap();
        e.award_pot().unwrap();
        assert_eq!(e.phase(), Phase::Settled);
        assert_eq!(
            e.process_action(1, PlayerAction::Check),
            Err(GameError::HandSettled)
        );
    }
}
