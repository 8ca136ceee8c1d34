//! Deterministic spin engine
//!
//! All game logic lives here. This module must be pure and deterministic:
//! - Symbols come only from an injected `SymbolSource`
//! - Grids are value snapshots, never mutated after generation
//! - No rendering, timer or platform dependencies

pub mod grid;
pub mod payline;
pub mod payout;
pub mod spin;
pub mod state;
pub mod symbols;

pub use grid::Grid;
pub use payline::{Payline, classic_paylines, evaluate, standard_paylines};
pub use payout::payout;
pub use spin::{commit, roll, spin};
pub use state::{GameState, History, SpinOutcome};
pub use symbols::{Alphabet, ScriptedSource, SeededSource, Symbol, SymbolSource};
