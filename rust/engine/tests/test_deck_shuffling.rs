use std::collections::HashSet;

use holdem_engine::cards::Card;
use holdem_engine::deck::Deck;
use holdem_engine::errors::GameError;

#[test]
fn deck_reset_has_52_unique_cards() {
    let mut deck = Deck::new_with_seed(42);
    deck.reset();
    let cards = deck.deal(52).expect("52 cards available");
    let set: HashSet<Card> = cards.iter().copied().collect();
    assert_eq!(set.len(), 52);
    assert_eq!(deck.remaining(), 0);
}

#[test]
fn shuffle_is_deterministic_with_same_seed() {
    let mut d1 = Deck::new_with_seed(12345);
    let mut d2 = Deck::new_with_seed(12345);
    d1.reset();
    d2.reset();
    assert_eq!(d1.deal(10).unwrap(), d2.deal(10).unwrap());
}

#[test]
fn different_seeds_produce_different_orders() {
    let mut d1 = Deck::new_with_seed(1);
    let mut d2 = Deck::new_with_seed(2);
    d1.reset();
    d2.reset();
    assert_ne!(d1.deal(52).unwrap(), d2.deal(52).unwrap());
}

#[test]
fn successive_resets_reshuffle() {
    let mut deck = Deck::new_with_seed(7);
    deck.reset();
    let first = deck.deal(52).unwrap();
    deck.reset();
    let second = deck.deal(52).unwrap();
    assert_ne!(first, second);
}

#[test]
fn overdraw_is_an_error_and_keeps_cards() {
    let mut deck = Deck::new_with_seed(5);
    deck.reset();
    deck.deal(50).unwrap();
    assert_eq!(
        deck.deal(3),
        Err(GameError::DeckExhausted {
            requested: 3,
            remaining: 2
        })
    );
    assert_eq!(deck.remaining(), 2);
    assert_eq!(deck.deal(2).unwrap().len(), 2);
}
