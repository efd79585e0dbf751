use serde::{Deserialize, Serialize};

/// Chips awarded to one seat at settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub seat: usize,
    pub amount: u32,
}

/// Splits `pot` evenly among `winners`. Odd chips that do not divide evenly
/// are handed out one each, starting with the first winner clockwise after
/// the dealer. The payouts always sum to `pot`.
///
/// Payouts are returned in that same clockwise order.
///
/// ```
/// use holdem_engine::pot::{split_pot, Payout};
///
/// let payouts = split_pot(25, &[0, 2], 1, 3);
/// assert_eq!(payouts, vec![Payout { seat: 2, amount: 13 }, Payout { seat: 0, amount: 12 }]);
/// ```
pub fn split_pot(pot: u32, winners: &[usize], dealer: usize, seat_count: usize) -> Vec<Payout> {
    if winners.is_empty() || seat_count == 0 {
        return Vec::new();
    }
    let mut ordered: Vec<usize> = winners.to_vec();
    ordered.sort_by_key(|&seat| distance_after(dealer, seat, seat_count));
    ordered.dedup();

    let n = ordered.len() as u32;
    let share = pot / n;
    let mut remainder = pot % n;
    ordered
        .into_iter()
        .map(|seat| {
            let odd = if remainder > 0 {
                remainder -= 1;
                1
            } else {
                0
            };
            Payout {
                seat,
                amount: share + odd,
            }
        })
        .collect()
}

/// 0 for the seat left of the dealer, `seat_count - 1` for the dealer.
fn distance_after(dealer: usize, seat: usize, seat_count: usize) -> usize {
    (seat + seat_count - (dealer % seat_count) - 1) % seat_count
}
