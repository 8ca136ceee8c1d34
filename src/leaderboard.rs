//! Payout leaderboard
//!
//! Session-only; tracks the top 10 payouts.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_LEADERBOARD_ENTRIES;

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Id of the spin that produced the payout
    pub spin_id: u64,
    /// Coins won
    pub payout: u64,
    /// Unix timestamp (ms) of the spin
    pub timestamp_ms: u64,
}

/// Top payouts, sorted descending.
///
/// Equal payouts keep insertion order: the earlier spin ranks higher, and a
/// full board does not admit a payout that only ties its last entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a payout qualifies for the leaderboard
    pub fn qualifies(&self, payout: u64) -> bool {
        if payout == 0 {
            return false;
        }
        if self.entries.len() < MAX_LEADERBOARD_ENTRIES {
            return true;
        }
        self.entries.last().map(|e| payout > e.payout).unwrap_or(true)
    }

    /// Rank a payout would achieve (1-indexed, None if it doesn't qualify)
    pub fn potential_rank(&self, payout: u64) -> Option<usize> {
        if !self.qualifies(payout) {
            return None;
        }
        let rank = self.entries.iter().position(|e| payout > e.payout);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Record a payout; returns the rank achieved (1-indexed) if it made the board
    pub fn record(&mut self, spin_id: u64, payout: u64, timestamp_ms: u64) -> Option<usize> {
        let rank = self.potential_rank(payout)?;
        self.entries.insert(
            rank - 1,
            LeaderboardEntry {
                spin_id,
                payout,
                timestamp_ms,
            },
        );
        self.entries.truncate(MAX_LEADERBOARD_ENTRIES);
        log::info!("Payout {} entered the leaderboard at #{}", payout, rank);
        Some(rank)
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top payout (if any)
    pub fn top_payout(&self) -> Option<u64> {
        self.entries.first().map(|e| e.payout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn payouts(board: &Leaderboard) -> Vec<u64> {
        board.entries().iter().map(|e| e.payout).collect()
    }

    #[test]
    fn test_zero_payout_ignored() {
        let mut board = Leaderboard::new();
        assert_eq!(board.record(1, 0, 0), None);
        assert!(board.is_empty());
    }

    #[test]
    fn test_sorted_descending() {
        let mut board = Leaderboard::new();
        board.record(1, 10, 0);
        board.record(2, 50, 0);
        assert_eq!(board.record(3, 30, 0), Some(2));
        assert_eq!(payouts(&board), vec![50, 30, 10]);
        assert_eq!(board.top_payout(), Some(50));
    }

    #[test]
    fn test_overflow_drops_smallest() {
        let mut board = Leaderboard::new();
        let first_ten = [10, 50, 30, 20, 40, 60, 70, 80, 90, 100];
        for (i, p) in first_ten.iter().enumerate() {
            board.record(i as u64, *p, 0);
        }
        assert_eq!(board.len(), MAX_LEADERBOARD_ENTRIES);

        assert_eq!(board.record(10, 500, 0), Some(1));
        assert_eq!(board.len(), MAX_LEADERBOARD_ENTRIES);
        assert_eq!(payouts(&board), vec![500, 100, 90, 80, 70, 60, 50, 40, 30, 20]);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut board = Leaderboard::new();
        board.record(1, 50, 0);
        board.record(2, 50, 0);
        board.record(3, 100, 0);
        let ids: Vec<u64> = board.entries().iter().map(|e| e.spin_id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_full_board_rejects_tie_with_last() {
        let mut board = Leaderboard::new();
        for i in 0..MAX_LEADERBOARD_ENTRIES as u64 {
            board.record(i, 10, 0);
        }
        assert!(!board.qualifies(10));
        assert_eq!(board.record(99, 10, 0), None);
        assert!(board.entries().iter().all(|e| e.spin_id != 99));
    }

    proptest! {
        #[test]
        fn prop_bounded_and_sorted(records in proptest::collection::vec(0u64..200, 0..60)) {
            let mut board = Leaderboard::new();
            for (i, p) in records.iter().enumerate() {
                board.record(i as u64, *p, 0);
                prop_assert!(board.len() <= MAX_LEADERBOARD_ENTRIES);
            }
            let ps = payouts(&board);
            prop_assert!(ps.windows(2).all(|w| w[0] >= w[1]));

            let mut expected: Vec<u64> = records.into_iter().filter(|&p| p > 0).collect();
            expected.sort_by(|a, b| b.cmp(a));
            expected.truncate(MAX_LEADERBOARD_ENTRIES);
            prop_assert_eq!(ps, expected);
        }
    }
}
