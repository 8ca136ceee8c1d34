//! Reel grid snapshots
//!
//! A grid is produced fresh for every spin and never mutated afterwards.

use serde::{Deserialize, Serialize};

use super::symbols::{Symbol, SymbolSource};
use crate::error::ConfigError;

/// Reel-major arrangement of symbols: `reels[reel][row]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    row_count: usize,
    reels: Vec<Vec<Symbol>>,
}

impl Grid {
    /// Draw a new grid, reel by reel, top row first
    pub fn generate(reel_count: usize, row_count: usize, source: &mut dyn SymbolSource) -> Self {
        let reels = (0..reel_count)
            .map(|_| (0..row_count).map(|_| source.next_symbol()).collect())
            .collect();
        Self { row_count, reels }
    }

    /// Build a grid from explicit reels (all the same height)
    pub fn from_reels(reels: Vec<Vec<Symbol>>) -> Result<Self, ConfigError> {
        let row_count = reels.first().map(Vec::len).unwrap_or(0);
        if row_count == 0 {
            return Err(ConfigError::InvalidGrid("grid has no cells"));
        }
        if reels.iter().any(|r| r.len() != row_count) {
            return Err(ConfigError::InvalidGrid("reels differ in height"));
        }
        Ok(Self { row_count, reels })
    }

    pub fn reel_count(&self) -> usize {
        self.reels.len()
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn cell_count(&self) -> usize {
        self.reels.len() * self.row_count
    }

    pub fn reels(&self) -> &[Vec<Symbol>] {
        &self.reels
    }

    /// Resolve a flat payline index.
    ///
    /// `flat` maps to `reels[flat / row_count][flat % row_count]`; paylines are
    /// authored against exactly this layout.
    pub fn cell(&self, flat: usize) -> Option<Symbol> {
        if self.row_count == 0 {
            return None;
        }
        self.reels
            .get(flat / self.row_count)
            .and_then(|reel| reel.get(flat % self.row_count))
            .copied()
    }

    /// Rows top to bottom, each listing one symbol per reel
    pub fn rows(&self) -> Vec<Vec<Symbol>> {
        (0..self.row_count)
            .map(|row| self.reels.iter().map(|reel| reel[row]).collect())
            .collect()
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, row) in self.rows().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, symbol) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{symbol}")?;
            }
        }
        Ok(())
    }
}
