//! Spin orchestration
//!
//! `roll` produces an outcome without touching state, `commit` folds it into a
//! new `GameState`. `spin` does both for the instant presentation path.

use super::grid::Grid;
use super::payline::evaluate;
use super::payout::payout;
use super::state::{GameState, SpinOutcome};
use super::symbols::SymbolSource;
use crate::error::ConfigError;
use crate::settings::Settings;

/// Draw a grid and score it against the current settings
pub fn roll(
    settings: &Settings,
    source: &mut dyn SymbolSource,
    spin_id: u64,
    now_ms: u64,
) -> Result<SpinOutcome, ConfigError> {
    settings.validate()?;

    let grid = Grid::generate(settings.reel_count, settings.row_count, source);
    let winning_lines = evaluate(&grid, &settings.paylines, settings.active_paylines)?;
    let bet = settings.bet_per_line;
    let coins = payout(winning_lines.len(), bet.value());

    log::debug!(
        "Spin {}: {} line(s) x {} -> {} winning, payout {}",
        spin_id,
        settings.active_paylines,
        bet.value(),
        winning_lines.len(),
        coins
    );

    Ok(SpinOutcome {
        id: spin_id,
        grid,
        winning_lines,
        bet_per_line: bet,
        active_paylines: settings.active_paylines,
        payout: coins,
        timestamp_ms: now_ms,
    })
}

/// Fold an outcome into a copy of `state`
pub fn commit(state: &GameState, outcome: SpinOutcome) -> GameState {
    let mut next = state.clone();
    next.next_spin_id = next.next_spin_id.max(outcome.id.saturating_add(1));
    if outcome.payout > 0 {
        next.leaderboard
            .record(outcome.id, outcome.payout, outcome.timestamp_ms);
    }
    next.history.append(outcome);
    next
}

/// One complete spin: roll then commit.
///
/// On error nothing is drawn and `state` is left as it was.
pub fn spin(
    settings: &Settings,
    state: &GameState,
    source: &mut dyn SymbolSource,
    now_ms: u64,
) -> Result<(SpinOutcome, GameState), ConfigError> {
    let outcome = roll(settings, source, state.next_spin_id, now_ms)?;
    let next = commit(state, outcome.clone());
    Ok((outcome, next))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{BetPerLine, Presentation};
    use crate::sim::payline::{Payline, classic_paylines};
    use crate::sim::symbols::{Alphabet, ScriptedSource, SeededSource};

    fn single_symbol_settings() -> Settings {
        Settings {
            paylines: vec![Payline::new(vec![0, 1, 2, 3, 4])],
            alphabet: Alphabet::from_glyphs(&['X']).unwrap(),
            presentation: Presentation::Instant,
            ..Default::default()
        }
    }

    #[test]
    fn test_single_symbol_always_wins() {
        let settings = single_symbol_settings();
        let mut source = SeededSource::new(settings.alphabet.clone(), 5);
        let mut state = GameState::new(settings.history_limit);
        for _ in 0..20 {
            let (outcome, next) = spin(&settings, &state, &mut source, 0).unwrap();
            assert_eq!(outcome.winning_lines, vec![0]);
            assert_eq!(outcome.payout, 10);
            state = next;
        }
        assert_eq!(state.history.len(), 20);
        assert_eq!(state.leaderboard.len(), 10);
    }

    #[test]
    fn test_engineered_grid_only_second_line_wins() {
        let settings = Settings {
            paylines: classic_paylines(),
            active_paylines: 3,
            bet_per_line: BetPerLine::Five,
            ..Default::default()
        };
        let mut source = ScriptedSource::from_reels(&[
            &['a', 'b', 'c'],
            &['d', 'e', 'z'],
            &['z', 'z', 'z'],
            &['z', 'g', 'h'],
            &['i', 'j', 'k'],
        ])
        .unwrap();
        let (outcome, _) = spin(&settings, &GameState::new(10), &mut source, 0).unwrap();
        assert_eq!(outcome.winning_lines, vec![1]);
        assert_eq!(outcome.payout, 50);
    }

    #[test]
    fn test_invalid_active_count_leaves_state_untouched() {
        let settings = Settings {
            paylines: classic_paylines(),
            active_paylines: 4,
            ..Default::default()
        };
        let mut source = SeededSource::new(Alphabet::default(), 1);
        let state = GameState::new(10);
        let before = state.clone();
        assert_eq!(
            spin(&settings, &state, &mut source, 0).unwrap_err(),
            ConfigError::ActivePaylines { active: 4, defined: 3 }
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_losing_spin_skips_leaderboard() {
        let settings = Settings {
            paylines: classic_paylines(),
            ..Default::default()
        };
        let mut source = ScriptedSource::from_reels(&[&['a', 'b', 'c']]).unwrap();
        let (outcome, next) = spin(&settings, &GameState::new(10), &mut source, 0).unwrap();
        assert_eq!(outcome.payout, 0);
        assert_eq!(next.history.len(), 1);
        assert!(next.leaderboard.is_empty());
    }

    #[test]
    fn test_spin_ids_increase() {
        let settings = Settings::default();
        let mut source = SeededSource::new(Alphabet::default(), 2);
        let (a, state) = spin(&settings, &GameState::new(10), &mut source, 0).unwrap();
        let (b, state) = spin(&settings, &state, &mut source, 0).unwrap();
        assert_eq!((a.id, b.id), (1, 2));
        assert_eq!(state.next_spin_id, 3);
    }

    #[test]
    fn test_commit_at_max_id_saturates() {
        let settings = Settings::default();
        let mut source = SeededSource::new(Alphabet::default(), 2);
        let mut state = GameState::new(10);
        state.next_spin_id = u64::MAX;
        let (outcome, next) = spin(&settings, &state, &mut source, 0).unwrap();
        assert_eq!(outcome.id, u64::MAX);
        assert_eq!(next.next_spin_id, u64::MAX);
    }

    #[test]
    fn test_same_seed_same_outcomes() {
        let settings = Settings::default().with_active_paylines(25).unwrap();
        let mut a = SeededSource::new(settings.alphabet.clone(), 1234);
        let mut b = SeededSource::new(settings.alphabet.clone(), 1234);
        let mut sa = GameState::new(100);
        let mut sb = GameState::new(100);
        for t in 0..50 {
            let (oa, na) = spin(&settings, &sa, &mut a, t).unwrap();
            let (ob, nb) = spin(&settings, &sb, &mut b, t).unwrap();
            assert_eq!(oa, ob);
            sa = na;
            sb = nb;
        }
        assert_eq!(sa, sb);
    }
}
