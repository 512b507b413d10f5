//! End-to-end integration tests

use rust_decimal_macros::dec;
use triple_momentum::config::{AccountType, Brokerage, Config, ExecutionMode, LogFormat};

#[test]
fn test_config_example_parses() {
    let config: Config = toml::from_str(include_str!("../../config.toml.example")).unwrap();
    config.validate().unwrap();

    assert_eq!(config.universe.tickers.len(), 12);
    assert_eq!(config.universe.tickers[0], "BTCUSD");
    assert_eq!(config.strategy.long_momentum_window, 30);
    assert_eq!(config.strategy.short_momentum_window, 10);
    assert_eq!(config.strategy.buy_limit, 3);
    assert_eq!(config.strategy.hold_limit, 5);
    assert_eq!(config.strategy.target_weight(), dec!(0.18));
    assert_eq!(config.execution.mode, ExecutionMode::Paper);
    assert_eq!(config.execution.brokerage, Brokerage::Bitfinex);
    assert_eq!(config.execution.account_type, AccountType::Cash);
    assert_eq!(config.execution.effective_fee_rate(), dec!(0.002));
    assert_eq!(config.telemetry.log_format, LogFormat::Pretty);
    assert!(config.telemetry.metrics_port.is_none());
}

#[test]
fn test_partial_config_keeps_defaults() {
    let toml = r#"
        [strategy]
        buy_limit = 2
        hold_limit = 4

        [telemetry]
        log_format = "json"
        metrics_port = 9090
    "#;

    let config: Config = toml::from_str(toml).unwrap();
    config.validate().unwrap();

    assert_eq!(config.strategy.buy_limit, 2);
    assert_eq!(config.strategy.hold_limit, 4);
    assert_eq!(config.strategy.target_weight(), dec!(0.225));
    assert_eq!(config.strategy.min_buy_momentum, dec!(-8));
    assert_eq!(config.universe.tickers.len(), 12);
    assert_eq!(config.telemetry.log_format, LogFormat::Json);
    assert_eq!(config.telemetry.metrics_port, Some(9090));
}

#[test]
fn test_inconsistent_limits_rejected() {
    let toml = r#"
        [strategy]
        buy_limit = 6
        hold_limit = 5
    "#;

    let config: Config = toml::from_str(toml).unwrap();
    assert!(config.validate().is_err());
}
