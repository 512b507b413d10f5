//! Asset signal: one symbol and its long/short momentum

use rust_decimal::Decimal;
use std::fmt;

use crate::config::StrategyConfig;
use crate::data::{Bar, Symbol};
use crate::momentum::{MomentumIndicator, MomentumPercent};

/// Momentum state for one tradable symbol
///
/// Created once per configured ticker and refreshed on every bar. Momentum
/// values are only meaningful once [`is_ready`](Self::is_ready) is true.
#[derive(Debug, Clone)]
pub struct AssetSignal<I = MomentumPercent> {
    symbol: Symbol,
    long_momentum: I,
    short_momentum: I,
    last_price: Option<Decimal>,
    min_buy_momentum: Decimal,
    max_sell_momentum: Decimal,
}

impl AssetSignal<MomentumPercent> {
    /// Build the signal with MOMP indicators sized from the config
    pub fn from_config(symbol: Symbol, config: &StrategyConfig) -> Self {
        Self::new(
            symbol,
            MomentumPercent::new(config.long_momentum_window),
            MomentumPercent::new(config.short_momentum_window),
            config,
        )
    }
}

impl<I: MomentumIndicator> AssetSignal<I> {
    pub fn new(symbol: Symbol, long_momentum: I, short_momentum: I, config: &StrategyConfig) -> Self {
        Self {
            symbol,
            long_momentum,
            short_momentum,
            last_price: None,
            min_buy_momentum: config.min_buy_momentum,
            max_sell_momentum: config.max_sell_momentum,
        }
    }

    /// Feed a new bar to both indicators
    pub fn update(&mut self, bar: &Bar) {
        self.last_price = Some(bar.close);
        self.long_momentum.update(bar.timestamp, bar.close);
        self.short_momentum.update(bar.timestamp, bar.close);
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Whether any bar has been received for the symbol
    pub fn has_data(&self) -> bool {
        self.last_price.is_some()
    }

    pub fn last_price(&self) -> Option<Decimal> {
        self.last_price
    }

    /// Price data present and both indicators warmed up
    pub fn is_ready(&self) -> bool {
        self.has_data() && self.long_momentum.is_ready() && self.short_momentum.is_ready()
    }

    /// Bars still needed before both indicators are ready
    pub fn warm_up_remaining(&self) -> usize {
        self.long_momentum
            .warm_up_remaining()
            .max(self.short_momentum.warm_up_remaining())
    }

    pub fn long_momentum(&self) -> Decimal {
        self.long_momentum.current_value()
    }

    pub fn short_momentum(&self) -> Decimal {
        self.short_momentum.current_value()
    }

    /// Long momentum at or above the minimum buy threshold
    pub fn is_potential_buy(&self) -> bool {
        let long = self.long_momentum();
        tracing::debug!(symbol = %self.symbol, long_momentum = %long, "Long momentum");
        long >= self.min_buy_momentum
    }

    /// Short momentum below the sell threshold
    pub fn is_potential_sell(&self) -> bool {
        let short = self.short_momentum();
        tracing::debug!(symbol = %self.symbol, short_momentum = %short, "Short momentum");
        short < self.max_sell_momentum
    }
}

impl<I: MomentumIndicator> fmt::Display for AssetSignal<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let price = self
            .last_price
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string());
        write!(
            f,
            "{} price={} longMomp={} shortMomp={}",
            self.symbol,
            price,
            self.long_momentum().round_dp(2),
            self.short_momentum().round_dp(2)
        )
    }
}
