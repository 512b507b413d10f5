//! Backtest command implementation

use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::backtest::{start_of_day, BacktestConfig, BacktestSimulator};
use crate::config::{Config, ExecutionMode};
use crate::execution::ExecutionError;

/// Result output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Args, Debug)]
pub struct BacktestArgs {
    /// Directory containing <TICKER>.parquet bar files
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Start date filter (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,

    /// End date filter (YYYY-MM-DD, exclusive)
    #[arg(long)]
    pub end: Option<String>,

    /// Initial capital
    #[arg(long)]
    pub capital: Option<Decimal>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl BacktestArgs {
    /// Apply command-line overrides to the configured backtest
    pub fn backtest_config(&self, config: &Config) -> anyhow::Result<BacktestConfig> {
        let mut backtest = BacktestConfig::from_config(config);
        if let Some(dir) = &self.data_dir {
            backtest.data_dir = dir.clone();
        }
        if let Some(start) = &self.start {
            backtest.start_time = Some(start_of_day(parse_date(start)?));
        }
        if let Some(end) = &self.end {
            backtest.end_time = Some(start_of_day(parse_date(end)?));
        }
        if let Some(capital) = self.capital {
            backtest.initial_capital = capital;
        }
        Ok(backtest)
    }

    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        if config.execution.mode != ExecutionMode::Paper {
            return Err(ExecutionError::Unsupported(format!("{:?}", config.execution.mode)).into());
        }

        let backtest = self.backtest_config(config)?;
        tracing::info!(
            data_dir = ?backtest.data_dir,
            start = ?backtest.start_time,
            end = ?backtest.end_time,
            capital = %backtest.initial_capital,
            "Running backtest"
        );

        let result = BacktestSimulator::new(backtest).run().await?;

        match self.format {
            OutputFormat::Table => println!("{}", result.summary.format_table()),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        }

        Ok(())
    }
}

fn parse_date(raw: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| anyhow::anyhow!("Invalid date {:?}: {}", raw, e))
}
