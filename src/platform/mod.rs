//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Wall-clock time
//! - Timer-based deferral (browser only)

pub mod time;

pub use time::now_ms;
