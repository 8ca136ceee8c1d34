//! Coin payout for a spin

use crate::consts::WIN_MULTIPLIER;

/// Coins won: every winning line pays `bet_per_line * 10`
#[inline]
pub fn payout(winning_lines: usize, bet_per_line: u32) -> u64 {
    (winning_lines as u64)
        .saturating_mul(bet_per_line as u64)
        .saturating_mul(WIN_MULTIPLIER)
}
