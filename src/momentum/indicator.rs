//! Momentum percent (MOMP)
//!
//! `100 * (current - past) / past`, where `past` is the close `period` bars
//! before the current one.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::VecDeque;
use std::fmt;

use super::MomentumIndicator;

/// Rolling-window percentage momentum
#[derive(Debug, Clone)]
pub struct MomentumPercent {
    /// Lookback in bars
    period: usize,

    /// Last `period + 1` closes, oldest first
    closes: VecDeque<Decimal>,

    /// Timestamp of the last accepted bar
    last_timestamp: Option<DateTime<Utc>>,

    /// Latest computed value
    current: Decimal,
}

impl MomentumPercent {
    /// Create an indicator over `period` bars
    pub fn new(period: usize) -> Self {
        Self {
            period,
            closes: VecDeque::with_capacity(period + 1),
            last_timestamp: None,
            current: Decimal::ZERO,
        }
    }
}

impl MomentumIndicator for MomentumPercent {
    fn update(&mut self, timestamp: DateTime<Utc>, price: Decimal) {
        // Out-of-order or repeated bars are ignored
        if let Some(last) = self.last_timestamp {
            if timestamp <= last {
                return;
            }
        }
        self.last_timestamp = Some(timestamp);

        self.closes.push_back(price);
        while self.closes.len() > self.period + 1 {
            self.closes.pop_front();
        }

        if !self.is_ready() {
            return;
        }

        if let Some(past) = self.closes.front().copied() {
            self.current = if past.is_zero() {
                Decimal::ZERO
            } else {
                dec!(100) * (price - past) / past
            };
        }
    }

    fn is_ready(&self) -> bool {
        self.closes.len() > self.period
    }

    fn current_value(&self) -> Decimal {
        self.current
    }

    fn period(&self) -> usize {
        self.period
    }

    fn warm_up_remaining(&self) -> usize {
        (self.period + 1).saturating_sub(self.closes.len())
    }
}

impl fmt::Display for MomentumPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.current.round_dp(2))
    }
}
