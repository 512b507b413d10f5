//! Configuration types for triple-momentum

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Lookback of the long momentum indicator, in bars
pub const LONG_MOMENTUM_WINDOW: usize = 30;
/// Lookback of the short momentum indicator, in bars
pub const SHORT_MOMENTUM_WINDOW: usize = 10;
/// Minimum number of days between two rebalances
pub const REBALANCE_WINDOW_DAYS: i64 = 1;
/// Number of top-ranked assets eligible for new entries
pub const BUY_LIMIT: usize = 3;
/// Number of top-ranked assets allowed to stay in the portfolio
pub const HOLD_LIMIT: usize = 5;

/// The default twelve-coin universe
pub const CRYPTO_TICKERS: [&str; 12] = [
    "BTCUSD", "ETCUSD", "LTCUSD", "XRPUSD", "BCHUSD", "XLMUSD", "BSVUSD", "EOSUSD", "XMRUSD",
    "TRXUSD", "XTZUSD", "VETUSD",
];

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// Config file is not valid TOML for this schema
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// Buy limit must select at least one asset
    #[error("buy_limit must be at least 1")]
    ZeroBuyLimit,
    /// The kept set must contain every buy candidate
    #[error("hold_limit ({hold}) must be >= buy_limit ({buy})")]
    HoldBelowBuy { hold: usize, buy: usize },
    /// Momentum lookback of zero bars
    #[error("{0} momentum window must be at least 1 bar")]
    ZeroWindow(&'static str),
    /// Rebalance window must be positive
    #[error("rebalance_window_days must be at least 1")]
    ZeroRebalanceWindow,
    /// Invested fraction out of (0, 1]
    #[error("invested_fraction must be in (0, 1], got {0}")]
    InvestedFraction(Decimal),
    /// No tickers to trade
    #[error("universe has no tickers")]
    EmptyRoster,
    /// Ticker listed twice
    #[error("duplicate ticker in universe: {0}")]
    DuplicateTicker(String),
    /// Backtest end is not after start
    #[error("backtest end {end} must be after start {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub universe: UniverseConfig,
    #[serde(default)]
    pub strategy: StrategyConfig,
    #[serde(default)]
    pub backtest: BacktestSettings,
    #[serde(default)]
    pub execution: ExecutionConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Tradable universe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UniverseConfig {
    #[serde(default = "default_tickers")]
    pub tickers: Vec<String>,
    #[serde(default)]
    pub resolution: Resolution,
}

/// Bar sampling resolution
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    #[default]
    Daily,
}

fn default_tickers() -> Vec<String> {
    CRYPTO_TICKERS.iter().map(|t| t.to_string()).collect()
}

impl Default for UniverseConfig {
    fn default() -> Self {
        Self {
            tickers: default_tickers(),
            resolution: Resolution::Daily,
        }
    }
}

impl UniverseConfig {
    /// Reject empty or duplicated ticker lists
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tickers.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }
        for (i, ticker) in self.tickers.iter().enumerate() {
            if self.tickers[..i].contains(ticker) {
                return Err(ConfigError::DuplicateTicker(ticker.clone()));
            }
        }
        Ok(())
    }
}

/// Rebalancing rules
///
/// Immutable once the controller is built. Every field has a default so a
/// partial `[strategy]` table only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Long momentum lookback (bars)
    #[serde(default = "default_long_window")]
    pub long_momentum_window: usize,

    /// Short momentum lookback (bars)
    #[serde(default = "default_short_window")]
    pub short_momentum_window: usize,

    /// Minimum days between rebalances
    #[serde(default = "default_rebalance_days")]
    pub rebalance_window_days: i64,

    /// Top-ranked assets eligible for entry
    #[serde(default = "default_buy_limit")]
    pub buy_limit: usize,

    /// Top-ranked assets allowed to be held
    #[serde(default = "default_hold_limit")]
    pub hold_limit: usize,

    /// Long momentum (percent) an asset needs to be bought
    #[serde(default = "default_min_buy_momentum")]
    pub min_buy_momentum: Decimal,

    /// Short momentum (percent) below which a kept asset is sold
    #[serde(default = "default_max_sell_momentum")]
    pub max_sell_momentum: Decimal,

    /// Share of the portfolio spread across `hold_limit` slots
    #[serde(default = "default_invested_fraction")]
    pub invested_fraction: Decimal,
}

fn default_long_window() -> usize {
    LONG_MOMENTUM_WINDOW
}
fn default_short_window() -> usize {
    SHORT_MOMENTUM_WINDOW
}
fn default_rebalance_days() -> i64 {
    REBALANCE_WINDOW_DAYS
}
fn default_buy_limit() -> usize {
    BUY_LIMIT
}
fn default_hold_limit() -> usize {
    HOLD_LIMIT
}
fn default_min_buy_momentum() -> Decimal {
    dec!(-8)
}
fn default_max_sell_momentum() -> Decimal {
    dec!(-3)
}
fn default_invested_fraction() -> Decimal {
    dec!(0.9) // keep 10% in cash
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            long_momentum_window: LONG_MOMENTUM_WINDOW,
            short_momentum_window: SHORT_MOMENTUM_WINDOW,
            rebalance_window_days: REBALANCE_WINDOW_DAYS,
            buy_limit: BUY_LIMIT,
            hold_limit: HOLD_LIMIT,
            min_buy_momentum: dec!(-8),
            max_sell_momentum: dec!(-3),
            invested_fraction: dec!(0.9),
        }
    }
}

impl StrategyConfig {
    /// Check the invariants the controller relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.buy_limit == 0 {
            return Err(ConfigError::ZeroBuyLimit);
        }
        if self.hold_limit < self.buy_limit {
            return Err(ConfigError::HoldBelowBuy {
                hold: self.hold_limit,
                buy: self.buy_limit,
            });
        }
        if self.long_momentum_window == 0 {
            return Err(ConfigError::ZeroWindow("long"));
        }
        if self.short_momentum_window == 0 {
            return Err(ConfigError::ZeroWindow("short"));
        }
        if self.rebalance_window_days < 1 {
            return Err(ConfigError::ZeroRebalanceWindow);
        }
        if self.invested_fraction <= Decimal::ZERO || self.invested_fraction > Decimal::ONE {
            return Err(ConfigError::InvestedFraction(self.invested_fraction));
        }
        Ok(())
    }

    /// Weight given to every new entry
    ///
    /// Split across the hold count, not the number of buys in a cycle.
    pub fn target_weight(&self) -> Decimal {
        self.invested_fraction / Decimal::from(self.hold_limit)
    }

    /// Minimum spacing between rebalances
    pub fn rebalance_window(&self) -> chrono::Duration {
        chrono::Duration::days(self.rebalance_window_days)
    }
}

/// Backtest settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestSettings {
    #[serde(default = "default_start")]
    pub start: NaiveDate,
    #[serde(default = "default_end")]
    pub end: NaiveDate,
    #[serde(default = "default_initial_cash")]
    pub initial_cash: Decimal,
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default()
}
fn default_end() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 1, 1).unwrap_or_default()
}
fn default_initial_cash() -> Decimal {
    dec!(10000)
}
fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

impl Default for BacktestSettings {
    fn default() -> Self {
        Self {
            start: default_start(),
            end: default_end(),
            initial_cash: default_initial_cash(),
            data_dir: default_data_dir(),
        }
    }
}

impl BacktestSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.end <= self.start {
            return Err(ConfigError::InvalidDateRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}

/// Execution engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionConfig {
    #[serde(default)]
    pub mode: ExecutionMode,
    #[serde(default)]
    pub brokerage: Brokerage,
    #[serde(default)]
    pub account_type: AccountType,
    /// Overrides the brokerage's default fee rate
    #[serde(default)]
    pub fee_rate: Option<Decimal>,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            mode: ExecutionMode::Paper,
            brokerage: Brokerage::Bitfinex,
            account_type: AccountType::Cash,
            fee_rate: None,
        }
    }
}

impl ExecutionConfig {
    /// Fee rate charged on traded notional
    pub fn effective_fee_rate(&self) -> Decimal {
        self.fee_rate
            .unwrap_or_else(|| self.brokerage.default_fee_rate())
    }
}

/// Execution mode. Only paper trading is wired to an engine.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    #[default]
    Paper,
    Live,
}

/// Brokerage model used to pick fees
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Brokerage {
    #[default]
    Bitfinex,
    /// No fees
    Default,
}

impl Brokerage {
    /// Taker fee charged by the venue
    pub fn default_fee_rate(&self) -> Decimal {
        match self {
            Brokerage::Bitfinex => dec!(0.002),
            Brokerage::Default => Decimal::ZERO,
        }
    }
}

/// Account type. A cash account cannot spend more than it holds.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    #[default]
    Cash,
    Margin,
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::Pretty,
            metrics_port: None,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format
    #[default]
    Pretty,
    /// JSON format for log aggregation
    Json,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.universe.validate()?;
        self.strategy.validate()?;
        self.backtest.validate()?;
        Ok(())
    }
}
