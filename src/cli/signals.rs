//! Signals command implementation
//!
//! Replays stored bars into a fresh controller without trading and prints
//! the roster ranking as of the last bar.

use clap::Args;
use std::fmt::Write;
use std::path::PathBuf;

use crate::backtest::{BacktestConfig, EventStream};
use crate::config::Config;
use crate::data::{BarStore, Symbol};
use crate::strategy::{rank, RebalanceController, RebalanceDecision};

#[derive(Args, Debug)]
pub struct SignalsArgs {
    /// Directory containing <TICKER>.parquet bar files
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

impl SignalsArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let mut backtest = BacktestConfig::from_config(config);
        if let Some(dir) = &self.data_dir {
            backtest.data_dir = dir.clone();
        }

        let symbols: Vec<Symbol> = backtest.tickers.iter().map(Symbol::new).collect();
        let bars = BarStore::new(backtest.data_dir.clone()).load_universe(
            &symbols,
            backtest.start_time,
            backtest.end_time,
        )?;

        let mut controller =
            RebalanceController::from_tickers(backtest.strategy.clone(), &backtest.tickers)?;
        for slice in EventStream::new(bars) {
            for bar in &slice.bars {
                controller.on_bar(bar);
            }
        }

        println!("{}", render(&controller));
        Ok(())
    }
}

/// Ranking table for the controller's current state
///
/// Momentum is only read once the whole roster is ready; before that the
/// roster is listed in registration order with the bars each asset still
/// needs.
pub(crate) fn render(controller: &RebalanceController) -> String {
    let mut out = String::new();
    let config = controller.config();
    let ready = controller.is_ready();

    let _ = writeln!(
        out,
        "{:<4} {:<10} {:>14} {:>10} {:>10} {:>6}  {:<3} {:<4}",
        "RANK", "SYMBOL", "PRICE", "LONG %", "SHORT %", "WARMUP", "BUY", "SELL"
    );

    let assets = if ready {
        rank(controller.roster())
    } else {
        controller.roster().iter().collect()
    };
    for (i, asset) in assets.into_iter().enumerate() {
        let price = asset
            .last_price()
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string());
        let (position, long, short, buy, sell) = if ready {
            (
                (i + 1).to_string(),
                asset.long_momentum().round_dp(2).to_string(),
                asset.short_momentum().round_dp(2).to_string(),
                yes_no(asset.is_potential_buy()),
                yes_no(asset.is_potential_sell()),
            )
        } else {
            let dash = || "-".to_string();
            (dash(), dash(), dash(), "-", "-")
        };
        let _ = writeln!(
            out,
            "{:<4} {:<10} {:>14} {:>10} {:>10} {:>6}  {:<3} {:<4}",
            position,
            asset.symbol(),
            price,
            long,
            short,
            asset.warm_up_remaining(),
            buy,
            sell,
        );
    }

    if ready {
        let outlook = match controller.decide() {
            RebalanceDecision::LiquidateAll { .. } => "liquidate all".to_string(),
            RebalanceDecision::Rotate(selection) => format!(
                "rotate: sell [{}] buy [{}]",
                join(&selection.sells),
                join(&selection.buys)
            ),
        };
        let _ = writeln!(
            out,
            "\nAverage long momentum: {} ({})",
            controller.average_momentum().round_dp(2),
            outlook
        );
    } else {
        let _ = writeln!(out, "\nAverage long momentum: - (warming up)");
    }
    let _ = write!(
        out,
        "Ready: {}  Target weight: {}",
        yes_no(ready),
        config.target_weight().round_dp(4)
    );
    out
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn join(symbols: &[Symbol]) -> String {
    symbols
        .iter()
        .map(Symbol::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
