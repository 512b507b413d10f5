//! triple-momentum: Momentum rotation strategy for a crypto basket
//!
//! This library provides the core components for:
//! - Momentum percent indicators over daily closes
//! - Per-asset buy/sell signals
//! - Cross-sectional ranking and periodic rebalancing
//! - Paper execution engine
//! - Parquet bar storage
//! - Backtesting with equity analytics
//! - Logging and Prometheus metrics

pub mod backtest;
pub mod cli;
pub mod config;
pub mod data;
pub mod execution;
pub mod momentum;
pub mod signal;
pub mod strategy;
pub mod telemetry;
