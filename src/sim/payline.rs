//! Payline definitions and win detection

use serde::{Deserialize, Serialize};

use super::grid::Grid;
use crate::consts::MAX_PAYLINES;
use crate::error::ConfigError;

/// Ordered flat cell indices (see [`Grid::cell`] for the mapping)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payline(pub Vec<usize>);

impl Payline {
    pub fn new(cells: Vec<usize>) -> Self {
        Self(cells)
    }

    /// Convert a row-per-reel pattern (e.g. `[0, 1, 2, 1, 0]` for a "V") to flat indices
    pub fn from_rows(rows: &[usize], row_count: usize) -> Self {
        Self(
            rows.iter()
                .enumerate()
                .map(|(reel, row)| reel * row_count + row)
                .collect(),
        )
    }

    pub fn cells(&self) -> &[usize] {
        &self.0
    }

    /// Check this line (at position `index`) fits a grid of `cells` cells
    pub fn validate(&self, index: usize, cells: usize) -> Result<(), ConfigError> {
        if self.0.is_empty() {
            return Err(ConfigError::EmptyPayline(index));
        }
        match self.0.iter().find(|&&c| c >= cells) {
            Some(&cell) => Err(ConfigError::PaylineOutOfBounds {
                line: index,
                cell,
                cells,
            }),
            None => Ok(()),
        }
    }
}

/// The three lines the game originally shipped with.
///
/// These are flat runs of five cells, so on a 5x3 grid the first one spans
/// reel 0 and part of reel 1 rather than a visual row.
pub fn classic_paylines() -> Vec<Payline> {
    vec![
        Payline::new(vec![0, 1, 2, 3, 4]),
        Payline::new(vec![5, 6, 7, 8, 9]),
        Payline::new(vec![10, 11, 12, 13, 14]),
    ]
}

/// Row patterns for a five-reel, three-row window
const PATTERNS: [[usize; 5]; MAX_PAYLINES] = [
    // Straight lines
    [1, 1, 1, 1, 1],
    [0, 0, 0, 0, 0],
    [2, 2, 2, 2, 2],
    // V shapes
    [0, 1, 2, 1, 0],
    [2, 1, 0, 1, 2],
    // Zigzag
    [0, 0, 1, 2, 2],
    [2, 2, 1, 0, 0],
    [1, 0, 0, 0, 1],
    [1, 2, 2, 2, 1],
    // W shapes
    [0, 1, 0, 1, 0],
    [2, 1, 2, 1, 2],
    [0, 1, 1, 1, 0],
    [2, 1, 1, 1, 2],
    // Steps
    [1, 1, 0, 1, 1],
    [1, 1, 2, 1, 1],
    [0, 2, 0, 2, 0],
    [2, 0, 2, 0, 2],
    [1, 0, 1, 0, 1],
    [1, 2, 1, 2, 1],
    [0, 0, 2, 0, 0],
    [2, 2, 0, 2, 2],
    [0, 2, 2, 2, 0],
    [2, 0, 0, 0, 2],
    [1, 0, 2, 0, 1],
    [1, 2, 0, 2, 1],
];

/// Standard shaped paylines for an arbitrary grid.
///
/// Patterns repeat across reels beyond the fifth and rows are clamped to the
/// grid height; lines that collapse onto an earlier one are dropped.
pub fn standard_paylines(reel_count: usize, row_count: usize) -> Vec<Payline> {
    if reel_count == 0 || row_count == 0 {
        return Vec::new();
    }
    let mut lines: Vec<Payline> = Vec::with_capacity(MAX_PAYLINES);
    for pattern in &PATTERNS {
        let rows: Vec<usize> = (0..reel_count)
            .map(|reel| pattern[reel % pattern.len()].min(row_count - 1))
            .collect();
        let line = Payline::from_rows(&rows, row_count);
        if !lines.contains(&line) {
            lines.push(line);
        }
    }
    lines
}

/// Winning payline indices among the first `active_count` lines.
///
/// A line wins only when every cell it references holds the same symbol.
/// Indices come back in authoring order.
pub fn evaluate(
    grid: &Grid,
    paylines: &[Payline],
    active_count: usize,
) -> Result<Vec<usize>, ConfigError> {
    if active_count < 1 || active_count > paylines.len() {
        return Err(ConfigError::ActivePaylines {
            active: active_count,
            defined: paylines.len(),
        });
    }

    let mut winners = Vec::new();
    for (index, line) in paylines[..active_count].iter().enumerate() {
        line.validate(index, grid.cell_count())?;
        let mut cells = line.cells().iter().filter_map(|&c| grid.cell(c));
        let Some(first) = cells.next() else {
            continue;
        };
        if cells.all(|s| s == first) {
            winners.push(index);
        }
    }
    Ok(winners)
}
