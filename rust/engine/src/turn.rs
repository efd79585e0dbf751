//! Seat rotation helpers. Pure functions over a seat count and an eligibility
//! predicate so they can be tested without an engine.

/// Scans `start+1, start+2, …` cyclically, checking `start` itself last, and
/// returns the first seat for which `is_eligible` holds.
pub fn next_eligible<F>(seat_count: usize, start: usize, is_eligible: F) -> Option<usize>
where
    F: Fn(usize) -> bool,
{
    if seat_count == 0 {
        return None;
    }
    (1..=seat_count)
        .map(|offset| (start + offset) % seat_count)
        .find(|&seat| is_eligible(seat))
}

/// Like [`next_eligible`] but `from` is the first candidate.
pub fn first_eligible_from<F>(seat_count: usize, from: usize, is_eligible: F) -> Option<usize>
where
    F: Fn(usize) -> bool,
{
    if seat_count == 0 {
        return None;
    }
    (0..seat_count)
        .map(|offset| (from + offset) % seat_count)
        .find(|&seat| is_eligible(seat))
}

/// Blind seats for a hand dealt from `dealer`: heads-up the dealer posts the
/// small blind, otherwise the two seats after the dealer post.
pub fn blind_seats(seat_count: usize, dealer: usize) -> (usize, usize) {
    if seat_count == 2 {
        (dealer, (dealer + 1) % 2)
    } else {
        ((dealer + 1) % seat_count, (dealer + 2) % seat_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_ineligible_seats() {
        let folded = [false, true, true, false];
        assert_eq!(next_eligible(4, 0, |s| !folded[s]), Some(3));
        assert_eq!(next_eligible(4, 3, |s| !folded[s]), Some(0));
    }

    #[test]
    fn start_seat_is_checked_last() {
        let eligible = [true, false, false];
        assert_eq!(next_eligible(3, 0, |s| eligible[s]), Some(0));
    }

    #[test]
    fn none_when_nobody_qualifies() {
        assert_eq!(next_eligible(3, 1, |_| false), None);
        assert_eq!(next_eligible(0, 0, |_| true), None);
        assert_eq!(first_eligible_from(3, 2, |_| false), None);
    }

    #[test]
    fn inclusive_scan_starts_at_from() {
        assert_eq!(first_eligible_from(5, 4, |_| true), Some(4));
        assert_eq!(first_eligible_from(5, 4, |s| s == 1), Some(1));
    }

    #[test]
    fn blinds_heads_up_and_ring() {
        assert_eq!(blind_seats(2, 0), (0, 1));
        assert_eq!(blind_seats(2, 1), (1, 0));
        assert_eq!(blind_seats(3, 0), (1, 2));
        assert_eq!(blind_seats(3, 2), (0, 1));
        assert_eq!(blind_seats(6, 5), (0, 1));
    }
}
