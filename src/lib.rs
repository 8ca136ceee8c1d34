//! Lucky Reels - A browser slot machine mini-game
//!
//! Core modules:
//! - `sim`: Deterministic spin engine (symbols, grid, paylines, payout, spin)
//! - `leaderboard`: Top payouts of the session
//! - `machine`: Spin requests, presentation delay and the in-flight guard
//! - `settings`: Player-editable configuration
//! - `platform`: Browser/native platform abstraction

pub mod error;
pub mod leaderboard;
pub mod machine;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, SpinError};
pub use leaderboard::{Leaderboard, LeaderboardEntry};
pub use machine::{SlotMachine, SpinRequest};
pub use settings::{BetPerLine, Presentation, Settings};

/// Game configuration constants
pub mod consts {
    /// Upper bound on defined (and selectable) paylines
    pub const MAX_PAYLINES: usize = 25;

    /// Grid dimensions
    pub const DEFAULT_REEL_COUNT: usize = 5;
    pub const DEFAULT_ROW_COUNT: usize = 3;

    /// Coins per winning line per unit of bet
    pub const WIN_MULTIPLIER: u64 = 10;

    /// Leaderboard capacity
    pub const MAX_LEADERBOARD_ENTRIES: usize = 10;

    /// Spins kept in history before the oldest are evicted
    pub const DEFAULT_HISTORY_LIMIT: usize = 100;

    /// How long the reels "spin" before the result is shown (ms)
    pub const SPIN_PRESENTATION_MS: u32 = 1500;

    /// Cherry, lemon, grapes, bell, diamond
    pub const DEFAULT_GLYPHS: [char; 5] = ['🍒', '🍋', '🍇', '🔔', '💎'];
}
