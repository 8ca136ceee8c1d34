//! Slot machine session
//!
//! Owns the current settings, the latest `GameState` snapshot and the symbol
//! source. At most one spin is in flight: with a delayed presentation the
//! outcome is rolled immediately but only committed once the delay elapses,
//! and further requests are refused until then.

use crate::error::{ConfigError, SpinError};
use crate::settings::{Presentation, Settings};
use crate::sim::{GameState, SeededSource, SpinOutcome, SymbolSource, commit, roll};

/// Answer to a spin request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpinRequest {
    /// Outcome already committed
    Settled(SpinOutcome),
    /// Outcome rolled, waiting for its presentation delay.
    ///
    /// `ticket` is unique per request for the lifetime of the machine, even
    /// when a cancelled spin's id is handed out again.
    Pending {
        spin_id: u64,
        ticket: u64,
        ready_at_ms: u64,
    },
}

#[derive(Debug, Clone)]
struct PendingSpin {
    outcome: SpinOutcome,
    ticket: u64,
    ready_at_ms: u64,
}

/// Stateful shell around the pure spin engine
#[derive(Debug, Clone)]
pub struct SlotMachine<S: SymbolSource = SeededSource> {
    settings: Settings,
    state: GameState,
    source: S,
    pending: Option<PendingSpin>,
    next_ticket: u64,
}

impl SlotMachine<SeededSource> {
    /// New session drawing from the settings' alphabet with a seeded RNG
    pub fn new(settings: Settings, seed: u64) -> Result<Self, ConfigError> {
        let source = SeededSource::new(settings.alphabet.clone(), seed);
        Self::with_source(settings, source)
    }

    /// Start over: empty history and leaderboard, fresh RNG
    pub fn reset(&mut self, seed: u64) {
        self.source = SeededSource::new(self.settings.alphabet.clone(), seed);
        self.state = GameState::new(self.settings.history_limit);
        self.pending = None;
        log::info!("Session reset with seed: {}", seed);
    }
}

impl<S: SymbolSource> SlotMachine<S> {
    /// New session drawing from `source`.
    ///
    /// The alphabet lock in `update_settings` only covers `settings.alphabet`;
    /// the caller keeps `source` drawing from that same alphabet.
    pub fn with_source(settings: Settings, source: S) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self {
            state: GameState::new(settings.history_limit),
            settings,
            source,
            pending: None,
            next_ticket: 1,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Latest committed state
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_spinning(&self) -> bool {
        self.pending.is_some()
    }

    /// Id of the spin currently being presented
    pub fn pending_spin(&self) -> Option<u64> {
        self.pending.as_ref().map(|p| p.outcome.id)
    }

    /// Start a spin.
    ///
    /// Refused with `SpinError::Busy` while another spin is pending. Nothing is
    /// drawn when the request fails.
    pub fn request_spin(&mut self, now_ms: u64) -> Result<SpinRequest, SpinError> {
        if let Some(pending) = &self.pending {
            log::warn!("Spin refused: spin {} still in flight", pending.outcome.id);
            return Err(SpinError::Busy);
        }

        let outcome = roll(
            &self.settings,
            &mut self.source,
            self.state.next_spin_id,
            now_ms,
        )?;

        match self.settings.presentation {
            Presentation::Instant => {
                self.state = commit(&self.state, outcome.clone());
                log_outcome(&outcome);
                Ok(SpinRequest::Settled(outcome))
            }
            Presentation::Delayed { delay_ms } => {
                let spin_id = outcome.id;
                let ticket = self.next_ticket;
                self.next_ticket = self.next_ticket.wrapping_add(1);
                let ready_at_ms = now_ms.saturating_add(delay_ms as u64);
                self.pending = Some(PendingSpin {
                    outcome,
                    ticket,
                    ready_at_ms,
                });
                Ok(SpinRequest::Pending {
                    spin_id,
                    ticket,
                    ready_at_ms,
                })
            }
        }
    }

    /// Commit the pending spin if its delay has elapsed
    pub fn poll(&mut self, now_ms: u64) -> Option<SpinOutcome> {
        let ready = self
            .pending
            .as_ref()
            .is_some_and(|p| now_ms >= p.ready_at_ms);
        if ready { self.settle() } else { None }
    }

    /// Commit the request holding `ticket` now, if it is still pending.
    ///
    /// Timer tasks call this when their delay fires; a stale ticket (the spin
    /// was cancelled, reset or already settled) is a no-op.
    pub fn complete(&mut self, ticket: u64) -> Option<SpinOutcome> {
        let current = self.pending.as_ref().is_some_and(|p| p.ticket == ticket);
        if current {
            self.settle()
        } else {
            None
        }
    }

    /// Abandon the pending spin. Nothing was committed, so nothing is undone.
    pub fn cancel(&mut self) -> Option<u64> {
        let cancelled = self.pending.take().map(|p| p.outcome.id);
        if let Some(id) = cancelled {
            log::info!("Spin {} cancelled", id);
        }
        cancelled
    }

    /// Replace the settings. The grid shape and alphabet are fixed for the session.
    pub fn update_settings(&mut self, settings: Settings) -> Result<(), SpinError> {
        if self.is_spinning() {
            return Err(SpinError::Busy);
        }
        settings.validate()?;
        if settings.reel_count != self.settings.reel_count
            || settings.row_count != self.settings.row_count
        {
            return Err(ConfigError::Locked("grid shape").into());
        }
        if settings.alphabet != self.settings.alphabet {
            return Err(ConfigError::Locked("symbol alphabet").into());
        }
        if settings.history_limit != self.state.history.limit() {
            self.state.history.set_limit(settings.history_limit);
        }
        self.settings = settings;
        Ok(())
    }

    /// Player edit: number of active paylines
    pub fn set_active_paylines(&mut self, active: usize) -> Result<(), SpinError> {
        let next = self.settings.with_active_paylines(active)?;
        self.update_settings(next)
    }

    /// Player edit: bet per line from a raw value
    pub fn set_bet_value(&mut self, value: u32) -> Result<(), SpinError> {
        let next = self.settings.with_bet_value(value)?;
        self.update_settings(next)
    }

    fn settle(&mut self) -> Option<SpinOutcome> {
        let pending = self.pending.take()?;
        self.state = commit(&self.state, pending.outcome.clone());
        log_outcome(&pending.outcome);
        Some(pending.outcome)
    }
}

fn log_outcome(outcome: &SpinOutcome) {
    if outcome.is_win() {
        log::info!(
            "Spin {} won {} coins on line(s) {:?}",
            outcome.id,
            outcome.payout,
            outcome.winning_lines
        );
    } else {
        log::debug!("Spin {} lost", outcome.id);
    }
}
