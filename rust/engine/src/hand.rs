use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Suit};

/// Hand categories, weakest first. The discriminant is the public 1..=10 value.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Category {
    HighCard = 1,
    OnePair = 2,
    TwoPair = 3,
    ThreeOfAKind = 4,
    Straight = 5,
    Flush = 6,
    FullHouse = 7,
    FourOfAKind = 8,
    StraightFlush = 9,
    RoyalFlush = 10,
}

impl Category {
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn from_value(v: u8) -> Option<Category> {
        let category = match v {
            1 => Category::HighCard,
            2 => Category::OnePair,
            3 => Category::TwoPair,
            4 => Category::ThreeOfAKind,
            5 => Category::Straight,
            6 => Category::Flush,
            7 => Category::FullHouse,
            8 => Category::FourOfAKind,
            9 => Category::StraightFlush,
            10 => Category::RoyalFlush,
            _ => return None,
        };
        Some(category)
    }

    pub fn name(self) -> &'static str {
        get_hand_name(self)
    }
}

pub fn get_hand_name(category: Category) -> &'static str {
    match category {
        Category::RoyalFlush => "Royal Flush",
        Category::StraightFlush => "Straight Flush",
        Category::FourOfAKind => "Four of a Kind",
        Category::FullHouse => "Full House",
        Category::Flush => "Flush",
        Category::Straight => "Straight",
        Category::ThreeOfAKind => "Three of a Kind",
        Category::TwoPair => "Two Pair",
        Category::OnePair => "One Pair",
        Category::HighCard => "High Card",
    }
}

/// Result of evaluating a card pool. Ordered by category, then kickers
/// element-wise, so `a > b` means `a` wins.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct HandStrength {
    pub category: Category,
    // kickers: ordered high -> low for tiebreaks
    pub kickers: Vec<u8>,
}

impl HandStrength {
    fn new(category: Category, kickers: Vec<u8>) -> Self {
        Self { category, kickers }
    }
}

/// Evaluates two hole cards together with 0..=5 board cards.
pub fn evaluate_hand(hole: &[Card], board: &[Card]) -> HandStrength {
    let mut pool = Vec::with_capacity(hole.len() + board.len());
    pool.extend_from_slice(hole);
    pool.extend_from_slice(board);
    evaluate_cards(&pool)
}

/// Evaluates a pool of at most seven cards. The result does not depend on the
/// order of `cards`.
pub fn evaluate_cards(cards: &[Card]) -> HandStrength {
    let mut rank_counts = [0u8; 15]; // 2..14 used
    let mut rank_mask: u16 = 0;
    let mut suit_counts = [0u8; 4];
    let mut by_suit_mask: [u16; 4] = [0, 0, 0, 0];
    for c in cards {
        let r = c.rank.value();
        rank_counts[r as usize] += 1;
        rank_mask |= 1u16 << r;
        let s = suit_index(c.suit);
        suit_counts[s] += 1;
        by_suit_mask[s] |= 1u16 << r;
    }

    if let Some(s) = (0..4).find(|&s| suit_counts[s] >= 5) {
        let mask = by_suit_mask[s];
        if let Some(high) = straight_high_from_mask(mask) {
            if high == 14 {
                return HandStrength::new(Category::RoyalFlush, vec![14]);
            }
            return HandStrength::new(Category::StraightFlush, vec![high]);
        }
        let top: Vec<u8> = ranks_desc(mask).take(5).collect();
        return HandStrength::new(Category::Flush, top);
    }

    if let Some(high) = straight_high_from_mask(rank_mask) {
        return HandStrength::new(Category::Straight, vec![high]);
    }

    classify_multiples(&rank_counts)
}

pub fn compare_hands(a: &HandStrength, b: &HandStrength) -> Ordering {
    a.cmp(b)
}

fn suit_index(s: Suit) -> usize {
    match s {
        Suit::Hearts => 0,
        Suit::Diamonds => 1,
        Suit::Clubs => 2,
        Suit::Spades => 3,
    }
}

fn ranks_desc(mask: u16) -> impl Iterator<Item = u8> {
    (2..=14u8).rev().filter(move |&r| mask & (1u16 << r) != 0)
}

/// Highest five-card run present in `mask`, by its top rank. The wheel
/// (A-2-3-4-5) counts with a high card of 5 and loses to every other run.
fn straight_high_from_mask(mask: u16) -> Option<u8> {
    let mut m = mask;
    // add Ace-low if Ace present
    if (m & (1u16 << 14)) != 0 {
        m |= 1u16 << 1;
    }
    // Sliding 5-bit window from Ace(14) down to 5
    for high in (5..=14u8).rev() {
        let window = 0b1_1111u16 << (high - 4);
        if (m & window) == window {
            return Some(high);
        }
    }
    None
}

/// Pairs/trips/quads classification. Groups are ordered by multiplicity, then
/// by face, both descending.
fn classify_multiples(rank_counts: &[u8; 15]) -> HandStrength {
    let mut groups: Vec<(u8, u8)> = (2..=14u8)
        .rev()
        .filter(|&r| rank_counts[r as usize] > 0)
        .map(|r| (rank_counts[r as usize], r))
        .collect();
    groups.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));

    let (top_count, top_face) = match groups.first() {
        Some(&g) => g,
        None => return HandStrength::new(Category::HighCard, Vec::new()),
    };
    let second = groups.get(1).copied();

    if top_count >= 4 {
        let mut k = vec![top_face];
        k.extend(other_faces(&groups, &[top_face], 1));
        return HandStrength::new(Category::FourOfAKind, k);
    }
    if top_count == 3 {
        if let Some((count, face)) = second {
            if count >= 2 {
                return HandStrength::new(Category::FullHouse, vec![top_face, face]);
            }
        }
        let mut k = vec![top_face];
        k.extend(other_faces(&groups, &[top_face], 2));
        return HandStrength::new(Category::ThreeOfAKind, k);
    }
    if top_count == 2 {
        if let Some((2, low_pair)) = second {
            let mut k = vec![top_face, low_pair];
            k.extend(other_faces(&groups, &[top_face, low_pair], 1));
            return HandStrength::new(Category::TwoPair, k);
        }
        let mut k = vec![top_face];
        k.extend(other_faces(&groups, &[top_face], 3));
        return HandStrength::new(Category::OnePair, k);
    }

    HandStrength::new(Category::HighCard, other_faces(&groups, &[], 5))
}

/// The `n` highest faces not listed in `exclude`.
fn other_faces(groups: &[(u8, u8)], exclude: &[u8], n: usize) -> Vec<u8> {
    let mut faces: Vec<u8> = groups
        .iter()
        .map(|&(_, face)| face)
        .filter(|face| !exclude.contains(face))
        .collect();
    faces.sort_unstable_by(|a, b| b.cmp(a));
    faces.truncate(n);
    faces
}
