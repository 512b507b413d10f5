//! Momentum indicators
//!
//! Percentage momentum over a fixed lookback, fed one bar at a time.
//! The strategy only depends on the [`MomentumIndicator`] contract.

mod indicator;

pub use indicator::MomentumPercent;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// A live-updating momentum reading for one symbol
pub trait MomentumIndicator: Send + Sync {
    /// Feed the close of a new bar
    fn update(&mut self, timestamp: DateTime<Utc>, price: Decimal);

    /// True once enough history has accumulated to produce a value
    fn is_ready(&self) -> bool;

    /// Current momentum in percent
    ///
    /// Unspecified (zero) until [`is_ready`](Self::is_ready) returns true.
    fn current_value(&self) -> Decimal;

    /// Lookback length in bars
    fn period(&self) -> usize;

    /// Bars still needed before the value is ready
    fn warm_up_remaining(&self) -> usize;
}
