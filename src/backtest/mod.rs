//! Backtesting module
//!
//! Replays stored daily bars through the rebalance controller and a paper
//! execution engine

mod analytics;
mod replay;
mod simulator;

pub use analytics::{BacktestResult, BacktestSummary, EquityPoint};
pub use replay::{EventStream, MarketSlice};
pub use simulator::BacktestSimulator;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::config::{Config, ExecutionConfig, StrategyConfig};

/// Backtest configuration
#[derive(Debug, Clone)]
pub struct BacktestConfig {
    /// Directory containing `<TICKER>.parquet` bar files
    pub data_dir: PathBuf,
    /// Tickers in roster order
    pub tickers: Vec<String>,
    /// Start time filter (inclusive)
    pub start_time: Option<DateTime<Utc>>,
    /// End time filter (exclusive)
    pub end_time: Option<DateTime<Utc>>,
    /// Initial capital
    pub initial_capital: Decimal,
    /// Rebalancing rules
    pub strategy: StrategyConfig,
    /// Fees and account type
    pub execution: ExecutionConfig,
}

impl BacktestConfig {
    /// Build from the loaded configuration file
    pub fn from_config(config: &Config) -> Self {
        Self {
            data_dir: config.backtest.data_dir.clone(),
            tickers: config.universe.tickers.clone(),
            start_time: Some(start_of_day(config.backtest.start)),
            end_time: Some(start_of_day(config.backtest.end)),
            initial_capital: config.backtest.initial_cash,
            strategy: config.strategy.clone(),
            execution: config.execution.clone(),
        }
    }
}

/// Midnight UTC of `date`
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}
