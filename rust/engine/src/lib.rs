//! # holdem-engine: Texas Hold'em Table Engine
//!
//! Rules engine for a single multiplayer Texas Hold'em table: blind posting,
//! turn rotation, action validation, street progression, showdown and pot
//! settlement. Every operation is synchronous and performs no I/O, so one
//! [`engine::Engine`] can be owned by whatever serializes the table's actions.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card), parsing and display
//! - [`deck`] - Seedable deck shuffling with ChaCha20 RNG
//! - [`engine`] - Hand lifecycle state machine for one table
//! - [`game`] - Streets and engine phases
//! - [`hand`] - Hand evaluation and strength comparison
//! - [`player`] - Per-seat state and player actions
//! - [`pot`] - Pot splitting between tied winners
//! - [`rules`] - Action validation and minimum raise
//! - [`turn`] - Seat rotation and blind placement
//! - [`snapshot`] - Serializable read-only table views
//! - [`logger`] - Hand history records and the JSONL writer
//! - [`config`] - Table stakes and seating
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_engine::cards::parse_cards;
//! use holdem_engine::hand::{evaluate_hand, Category};
//!
//! let hole = parse_cards("As Ks").unwrap();
//! let board = parse_cards("Qs Js Ts 2d 3c").unwrap();
//! assert_eq!(evaluate_hand(&hole, &board).category, Category::RoyalFlush);
//! ```
//!
//! ## Deterministic Gameplay
//!
//! A table created with a seed deals the same cards every run:
//!
//! ```rust
//! use holdem_engine::deck::Deck;
//!
//! let mut a = Deck::new_with_seed(42);
//! let mut b = Deck::new_with_seed(42);
//! a.reset();
//! b.reset();
//! assert_eq!(a.deal(5).unwrap(), b.deal(5).unwrap());
//! ```

pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod player;
pub mod pot;
pub mod rules;
pub mod snapshot;
pub mod turn;
