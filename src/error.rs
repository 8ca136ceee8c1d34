//! Error types for the spin engine

use thiserror::Error;

/// Invalid configuration handed to the engine.
///
/// Raised at edit time by [`crate::Settings`] and again by the orchestrator
/// before any symbol is drawn, so a failed spin never touches game state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("bet per line {0} is not one of 1, 5, 10")]
    InvalidBet(u32),

    #[error("active payline count {active} outside 1..={defined}")]
    ActivePaylines { active: usize, defined: usize },

    #[error("{0} paylines defined, at most {max} allowed", max = crate::consts::MAX_PAYLINES)]
    TooManyPaylines(usize),

    #[error("payline {line} references cell {cell} outside a {cells}-cell grid")]
    PaylineOutOfBounds { line: usize, cell: usize, cells: usize },

    #[error("payline {0} has no cells")]
    EmptyPayline(usize),

    #[error("symbol alphabet is empty")]
    EmptyAlphabet,

    #[error("invalid grid: {0}")]
    InvalidGrid(&'static str),

    #[error("history limit must be at least 1")]
    HistoryLimit,

    #[error("{0} cannot change during a session")]
    Locked(&'static str),

    #[error("malformed settings: {0}")]
    Parse(String),
}

/// Why a spin request was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpinError {
    /// Another spin is still being presented
    #[error("a spin is already in flight")]
    Busy,

    #[error(transparent)]
    Config(#[from] ConfigError),
}
