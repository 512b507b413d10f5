//! Prometheus metrics

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Gauge metric types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaugeMetric {
    /// Total portfolio value
    Equity,
    /// Free cash
    Cash,
    /// Open position count
    OpenPositions,
}

/// Counter metric types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterMetric {
    /// Rebalances that passed gating
    Rebalances,
    /// Orders that produced a fill
    OrdersFilled,
}

impl GaugeMetric {
    pub fn name(&self) -> &'static str {
        match self {
            GaugeMetric::Equity => "triple_momentum_equity_usd",
            GaugeMetric::Cash => "triple_momentum_cash_usd",
            GaugeMetric::OpenPositions => "triple_momentum_open_positions",
        }
    }
}

impl CounterMetric {
    pub fn name(&self) -> &'static str {
        match self {
            CounterMetric::Rebalances => "triple_momentum_rebalances_total",
            CounterMetric::OrdersFilled => "triple_momentum_orders_filled_total",
        }
    }
}

/// Set a gauge value
pub fn set_gauge(metric: GaugeMetric, value: Decimal) {
    let value = value.to_f64().unwrap_or_default();
    metrics::gauge!(metric.name()).set(value);
    tracing::trace!(metric = metric.name(), value, "Setting gauge");
}

/// Increment a counter by one
pub fn increment_counter(metric: CounterMetric) {
    metrics::counter!(metric.name()).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_metric_names_prefixed() {
        for gauge in [GaugeMetric::Equity, GaugeMetric::Cash, GaugeMetric::OpenPositions] {
            assert!(gauge.name().starts_with("triple_momentum_"));
        }
        assert!(CounterMetric::Rebalances.name().ends_with("_total"));
        assert!(CounterMetric::OrdersFilled.name().ends_with("_total"));
    }

    #[test]
    fn test_recording_without_exporter_is_noop() {
        set_gauge(GaugeMetric::Equity, dec!(10000));
        increment_counter(CounterMetric::Rebalances);
    }
}
