//! Game configuration
//!
//! Everything a spin depends on lives in one validated struct. Player edits go
//! through the `with_*` helpers, which reject bad values instead of clamping.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::{Alphabet, Payline, standard_paylines};

/// Allowed bet sizes per active line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(try_from = "u32", into = "u32")]
pub enum BetPerLine {
    #[default]
    One,
    Five,
    Ten,
}

impl BetPerLine {
    pub const ALL: [BetPerLine; 3] = [BetPerLine::One, BetPerLine::Five, BetPerLine::Ten];

    pub fn value(&self) -> u32 {
        match self {
            BetPerLine::One => 1,
            BetPerLine::Five => 5,
            BetPerLine::Ten => 10,
        }
    }

    pub fn from_value(value: u32) -> Result<Self, ConfigError> {
        match value {
            1 => Ok(BetPerLine::One),
            5 => Ok(BetPerLine::Five),
            10 => Ok(BetPerLine::Ten),
            other => Err(ConfigError::InvalidBet(other)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BetPerLine::One => "1",
            BetPerLine::Five => "5",
            BetPerLine::Ten => "10",
        }
    }
}

impl TryFrom<u32> for BetPerLine {
    type Error = ConfigError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl From<BetPerLine> for u32 {
    fn from(bet: BetPerLine) -> Self {
        bet.value()
    }
}

/// When a spin result becomes visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Presentation {
    /// Commit immediately
    Instant,
    /// Hold the result back while the reels animate
    Delayed { delay_ms: u32 },
}

impl Default for Presentation {
    fn default() -> Self {
        Presentation::Delayed {
            delay_ms: SPIN_PRESENTATION_MS,
        }
    }
}

impl Presentation {
    pub fn delay_ms(&self) -> u32 {
        match self {
            Presentation::Instant => 0,
            Presentation::Delayed { delay_ms } => *delay_ms,
        }
    }
}

/// Machine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Grid width
    pub reel_count: usize,
    /// Grid height
    pub row_count: usize,
    /// How many paylines (a prefix of `paylines`) are played
    pub active_paylines: usize,
    pub bet_per_line: BetPerLine,
    /// Static payline table, at most `MAX_PAYLINES`
    pub paylines: Vec<Payline>,
    pub alphabet: Alphabet,
    /// Spins retained in history
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    #[serde(default)]
    pub presentation: Presentation,
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reel_count: DEFAULT_REEL_COUNT,
            row_count: DEFAULT_ROW_COUNT,
            active_paylines: 1,
            bet_per_line: BetPerLine::One,
            paylines: standard_paylines(DEFAULT_REEL_COUNT, DEFAULT_ROW_COUNT),
            alphabet: Alphabet::default(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            presentation: Presentation::default(),
        }
    }
}

impl Settings {
    /// Check every invariant the engine relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reel_count == 0 || self.row_count == 0 {
            return Err(ConfigError::InvalidGrid("grid has no cells"));
        }
        if self.paylines.len() > MAX_PAYLINES {
            return Err(ConfigError::TooManyPaylines(self.paylines.len()));
        }
        if self.active_paylines < 1 || self.active_paylines > self.paylines.len() {
            return Err(ConfigError::ActivePaylines {
                active: self.active_paylines,
                defined: self.paylines.len(),
            });
        }
        let cells = self.reel_count * self.row_count;
        for (i, line) in self.paylines.iter().enumerate() {
            line.validate(i, cells)?;
        }
        if self.history_limit == 0 {
            return Err(ConfigError::HistoryLimit);
        }
        Ok(())
    }

    /// Number of lines the player can choose from
    pub fn defined_paylines(&self) -> usize {
        self.paylines.len()
    }

    /// Total stake for one spin
    pub fn total_bet(&self) -> u64 {
        self.active_paylines as u64 * self.bet_per_line.value() as u64
    }

    /// Edit the active line count
    pub fn with_active_paylines(&self, active: usize) -> Result<Self, ConfigError> {
        let next = Self {
            active_paylines: active,
            ..self.clone()
        };
        next.validate()?;
        Ok(next)
    }

    /// Edit the bet from a raw value (e.g. a dropdown)
    pub fn with_bet_value(&self, value: u32) -> Result<Self, ConfigError> {
        let bet_per_line = BetPerLine::from_value(value)?;
        let next = Self {
            bet_per_line,
            ..self.clone()
        };
        next.validate()?;
        Ok(next)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}
