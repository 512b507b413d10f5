//! Backtest simulator engine

use super::{BacktestConfig, BacktestResult, BacktestSummary, EquityPoint, EventStream};
use crate::data::{Bar, BarStore, Symbol};
use crate::execution::{ExecutionEngine, PaperEngine};
use crate::strategy::RebalanceController;
use crate::telemetry::{increment_counter, set_gauge, CounterMetric, GaugeMetric};

/// Runs backtest simulation
pub struct BacktestSimulator {
    config: BacktestConfig,
}

impl BacktestSimulator {
    /// Create a new simulator
    pub fn new(config: BacktestConfig) -> Self {
        Self { config }
    }

    /// Load bars from the data directory and run the backtest
    pub async fn run(&self) -> anyhow::Result<BacktestResult> {
        let symbols: Vec<Symbol> = self.config.tickers.iter().map(Symbol::new).collect();
        let store = BarStore::new(self.config.data_dir.clone());
        let bars = store.load_universe(&symbols, self.config.start_time, self.config.end_time)?;

        tracing::info!(
            data_dir = ?self.config.data_dir,
            symbols = symbols.len(),
            bars = bars.len(),
            "Loaded bars"
        );

        self.run_bars(bars).await
    }

    /// Run the backtest over bars already in memory
    pub async fn run_bars(&self, bars: Vec<Bar>) -> anyhow::Result<BacktestResult> {
        let mut controller =
            RebalanceController::from_tickers(self.config.strategy.clone(), &self.config.tickers)?;
        let engine = PaperEngine::from_config(self.config.initial_capital, &self.config.execution);

        let mut equity_curve = Vec::new();
        let mut rebalances = 0;

        for slice in EventStream::new(bars) {
            for bar in &slice.bars {
                controller.on_bar(bar);
                engine.mark(bar).await;
            }

            let portfolio = engine.portfolio().await;
            let orders = controller.on_market_update(slice.timestamp, &portfolio);

            if controller.last_rebalance() == Some(slice.timestamp) {
                rebalances += 1;
                increment_counter(CounterMetric::Rebalances);

                for order in &orders {
                    match engine.execute(order).await {
                        Ok(Some(fill)) => {
                            increment_counter(CounterMetric::OrdersFilled);
                            tracing::debug!(
                                symbol = %fill.symbol,
                                side = ?fill.side,
                                quantity = %fill.quantity,
                                notional = %fill.notional(),
                                fees = %fill.fees,
                                "Order filled"
                            );
                        }
                        Ok(None) => {}
                        Err(e) => {
                            tracing::warn!(
                                time = %slice.timestamp,
                                symbol = %order.symbol(),
                                order = %order,
                                error = %e,
                                "Order rejected"
                            );
                        }
                    }
                }

                let after = engine.portfolio().await;
                tracing::info!(
                    time = %slice.timestamp,
                    cash = %after.cash,
                    total_value = %after.total_value,
                    open_positions = after.open_positions(),
                    sells = orders.iter().filter(|o| o.is_liquidate()).count(),
                    buys = orders.iter().filter(|o| !o.is_liquidate()).count(),
                    "Rebalance complete"
                );
            }

            let portfolio = engine.portfolio().await;
            set_gauge(GaugeMetric::Equity, portfolio.total_value);
            set_gauge(GaugeMetric::Cash, portfolio.cash);
            set_gauge(
                GaugeMetric::OpenPositions,
                portfolio.open_positions().into(),
            );

            equity_curve.push(EquityPoint {
                timestamp: slice.timestamp,
                equity: portfolio.total_value,
                cash: portfolio.cash,
            });
        }

        let fills = engine.fills().await;
        let summary =
            BacktestSummary::compute(self.config.initial_capital, &equity_curve, &fills, rebalances);

        tracing::info!(
            final_equity = %summary.final_equity,
            net_pnl = %summary.net_pnl,
            rebalances = summary.rebalances,
            trades = summary.total_trades,
            "Backtest finished"
        );

        Ok(BacktestResult {
            summary,
            equity_curve,
            fills,
        })
    }
}
