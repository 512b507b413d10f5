//! Backtest integration tests over Parquet bar files

use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tempfile::TempDir;
use triple_momentum::backtest::{BacktestConfig, BacktestSimulator};
use triple_momentum::config::{Config, StrategyConfig};
use triple_momentum::data::{Bar, BarStore, Symbol};

const DAYS: i64 = 10;

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()
}

/// Daily bars growing by `step_pct` percent a day
fn trending(ticker: &str, first: Decimal, step_pct: i64) -> Vec<Bar> {
    let mut close = first;
    (0..DAYS)
        .map(|day| {
            let bar = Bar::new(ticker, start() + Duration::days(day), close);
            close = close * Decimal::from(100 + step_pct) / dec!(100);
            bar
        })
        .collect()
}

fn write_universe(dir: &TempDir) {
    let store = BarStore::new(dir.path());
    for bars in [
        trending("AAAUSD", dec!(100), 10),
        trending("BBBUSD", dec!(50), 5),
        trending("CCCUSD", dec!(20), -5),
        trending("DDDUSD", dec!(10), 0),
    ] {
        let symbol = bars[0].symbol.clone();
        store.write_bars(&symbol, &bars).unwrap();
    }
}

fn backtest_config(dir: &TempDir) -> BacktestConfig {
    let mut config = BacktestConfig::from_config(&Config::default());
    config.data_dir = dir.path().to_path_buf();
    config.tickers = ["AAAUSD", "BBBUSD", "CCCUSD", "DDDUSD"]
        .iter()
        .map(|t| t.to_string())
        .collect();
    config.strategy = StrategyConfig {
        long_momentum_window: 3,
        short_momentum_window: 1,
        ..StrategyConfig::default()
    };
    config
}

#[tokio::test]
async fn test_backtest_from_parquet() {
    let dir = TempDir::new().unwrap();
    write_universe(&dir);

    let result = BacktestSimulator::new(backtest_config(&dir))
        .run()
        .await
        .unwrap();

    // Ready from the fourth bar, then one rebalance a day
    assert_eq!(result.equity_curve.len(), DAYS as usize);
    assert_eq!(result.summary.rebalances, 7);

    // Top three enter on the first rebalance and are never rotated out
    let bought: Vec<&str> = result.fills.iter().map(|f| f.symbol.as_str()).collect();
    assert_eq!(bought, vec!["AAAUSD", "BBBUSD", "DDDUSD"]);
    assert_eq!(result.summary.total_trades, 3);
    assert!(result.summary.total_fees > Decimal::ZERO);
    assert!(result.summary.final_equity > result.summary.initial_capital);
}

#[tokio::test]
async fn test_backtest_date_filter() {
    let dir = TempDir::new().unwrap();
    write_universe(&dir);

    let mut config = backtest_config(&dir);
    config.end_time = Some(start() + Duration::days(3));

    let result = BacktestSimulator::new(config).run().await.unwrap();

    // Three bars per asset never warm up a three-bar lookback
    assert_eq!(result.equity_curve.len(), 3);
    assert_eq!(result.summary.rebalances, 0);
    assert!(result.fills.is_empty());
    assert_eq!(result.summary.final_equity, dec!(10000));
}

#[tokio::test]
async fn test_missing_asset_blocks_trading() {
    let dir = TempDir::new().unwrap();
    write_universe(&dir);

    let mut config = backtest_config(&dir);
    config.tickers.push("EEEUSD".to_string());
    assert!(!BarStore::new(dir.path())
        .path_for(&Symbol::new("EEEUSD"))
        .exists());

    let result = BacktestSimulator::new(config).run().await.unwrap();

    assert_eq!(result.summary.rebalances, 0);
    assert!(result.fills.is_empty());
}

#[tokio::test]
async fn test_result_serializes_to_json() {
    let dir = TempDir::new().unwrap();
    write_universe(&dir);

    let result = BacktestSimulator::new(backtest_config(&dir))
        .run()
        .await
        .unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["summary"]["rebalances"], 7);
    assert_eq!(json["equity_curve"].as_array().unwrap().len(), DAYS as usize);
    assert_eq!(json["fills"][0]["side"], "buy");
}
