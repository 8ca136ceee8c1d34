//! Spin outcomes and the session state they fold into
//!
//! `GameState` is a plain value: the orchestrator returns a new one per spin
//! and the view layer keeps whichever snapshot it was last handed.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::grid::Grid;
use super::payline::Payline;
use crate::leaderboard::Leaderboard;
use crate::settings::BetPerLine;

/// Result of one spin. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinOutcome {
    /// Session-unique, increasing spin id
    pub id: u64,
    pub grid: Grid,
    /// Winning payline indices, authoring order
    pub winning_lines: Vec<usize>,
    pub bet_per_line: BetPerLine,
    pub active_paylines: usize,
    /// Coins won
    pub payout: u64,
    /// Unix timestamp (ms)
    pub timestamp_ms: u64,
}

impl SpinOutcome {
    pub fn is_win(&self) -> bool {
        self.payout > 0
    }

    /// Flat cell indices covered by the winning lines of `paylines`.
    ///
    /// Indices that `paylines` no longer defines are skipped.
    pub fn winning_cells(&self, paylines: &[Payline]) -> Vec<usize> {
        self.winning_lines
            .iter()
            .filter_map(|&i| paylines.get(i))
            .flat_map(|line| line.cells().iter().copied())
            .collect()
    }

    /// Player-facing result line
    pub fn message(&self) -> String {
        if self.winning_lines.is_empty() {
            "No win. Try again!".to_string()
        } else {
            format!("You won {} coins!", self.payout)
        }
    }
}

/// Past spins, newest first, capped at `limit` entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    entries: VecDeque<SpinOutcome>,
    limit: usize,
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(limit.min(64)),
            limit: limit.max(1),
        }
    }

    /// Prepend an outcome, evicting the oldest past the limit
    pub fn append(&mut self, outcome: SpinOutcome) {
        self.entries.push_front(outcome);
        while self.entries.len() > self.limit {
            self.entries.pop_back();
        }
    }

    /// Everything retained, most recent first
    pub fn all(&self) -> impl Iterator<Item = &SpinOutcome> {
        self.entries.iter()
    }

    /// `len` entries starting `offset` spins back from the latest
    pub fn page(&self, offset: usize, len: usize) -> Vec<&SpinOutcome> {
        self.entries.iter().skip(offset).take(len).collect()
    }

    pub fn latest(&self) -> Option<&SpinOutcome> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Change the retention limit, dropping the oldest entries if needed
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit.max(1);
        self.entries.truncate(self.limit);
    }
}

/// Session state (serializable snapshot)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub history: History,
    pub leaderboard: Leaderboard,
    /// Id handed to the next spin
    pub next_spin_id: u64,
}

impl GameState {
    pub fn new(history_limit: usize) -> Self {
        Self {
            history: History::new(history_limit),
            leaderboard: Leaderboard::new(),
            next_spin_id: 1,
        }
    }

    /// Total coins won across retained history
    pub fn total_won(&self) -> u64 {
        self.history.all().map(|o| o.payout).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::symbols::Symbol;

    fn outcome(id: u64, payout: u64) -> SpinOutcome {
        SpinOutcome {
            id,
            grid: Grid::from_reels(vec![vec![Symbol('a')]]).unwrap(),
            winning_lines: if payout > 0 { vec![0] } else { vec![] },
            bet_per_line: BetPerLine::One,
            active_paylines: 1,
            payout,
            timestamp_ms: id * 1000,
        }
    }

    #[test]
    fn test_history_newest_first() {
        let mut history = History::new(10);
        for id in 1..=3 {
            history.append(outcome(id, 0));
        }
        let ids: Vec<u64> = history.all().map(|o| o.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
        assert_eq!(history.latest().map(|o| o.id), Some(3));
    }

    #[test]
    fn test_history_evicts_oldest() {
        let mut history = History::new(2);
        for id in 1..=5 {
            history.append(outcome(id, 0));
        }
        let ids: Vec<u64> = history.all().map(|o| o.id).collect();
        assert_eq!(ids, vec![5, 4]);
    }

    #[test]
    fn test_history_shrink_limit() {
        let mut history = History::new(10);
        for id in 1..=6 {
            history.append(outcome(id, 0));
        }
        history.set_limit(3);
        let ids: Vec<u64> = history.all().map(|o| o.id).collect();
        assert_eq!(ids, vec![6, 5, 4]);
    }

    #[test]
    fn test_history_page() {
        let mut history = History::new(50);
        for id in 1..=7 {
            history.append(outcome(id, 0));
        }
        let ids: Vec<u64> = history.page(2, 3).iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![5, 4, 3]);
        assert!(history.page(10, 3).is_empty());
    }

    #[test]
    fn test_winning_cells_skip_undefined_lines() {
        let mut o = outcome(1, 20);
        o.winning_lines = vec![0, 3];
        let lines = vec![Payline::new(vec![0, 1, 2])];
        assert_eq!(o.winning_cells(&lines), vec![0, 1, 2]);
        assert!(o.winning_cells(&[]).is_empty());
    }

    #[test]
    fn test_messages() {
        assert_eq!(outcome(1, 0).message(), "No win. Try again!");
        assert_eq!(outcome(1, 50).message(), "You won 50 coins!");
    }
}
