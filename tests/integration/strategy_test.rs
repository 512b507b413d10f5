//! Rebalance controller integration tests through the public API

use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use triple_momentum::config::StrategyConfig;
use triple_momentum::data::{Bar, Symbol};
use triple_momentum::strategy::{OrderInstruction, PortfolioSnapshot, RebalanceController};

fn day(n: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 6, 1, 0, 0, 0).unwrap() + Duration::days(n)
}

fn short_config() -> StrategyConfig {
    StrategyConfig {
        long_momentum_window: 2,
        short_momentum_window: 1,
        ..StrategyConfig::default()
    }
}

/// Feed one close per ticker per day
fn feed(controller: &mut RebalanceController, days: &[&[(&str, Decimal)]]) {
    for (n, closes) in days.iter().enumerate() {
        for (ticker, close) in closes.iter() {
            controller.on_bar(&Bar::new(*ticker, day(n as i64), *close));
        }
    }
}

fn holding(symbols: &[&str]) -> PortfolioSnapshot {
    PortfolioSnapshot {
        cash: dec!(1000),
        total_value: dec!(2000),
        holdings: symbols
            .iter()
            .map(|s| (Symbol::new(*s), dec!(1)))
            .collect::<HashMap<_, _>>(),
    }
}

#[test]
fn test_rotation_out_of_weak_asset() {
    let mut controller =
        RebalanceController::from_tickers(short_config(), &["BTCUSD", "ETHUSD", "LTCUSD"])
            .unwrap();
    feed(
        &mut controller,
        &[
            &[("BTCUSD", dec!(100)), ("ETHUSD", dec!(100)), ("LTCUSD", dec!(100))],
            &[("BTCUSD", dec!(110)), ("ETHUSD", dec!(105)), ("LTCUSD", dec!(110))],
            &[("BTCUSD", dec!(120)), ("ETHUSD", dec!(110)), ("LTCUSD", dec!(104))],
        ],
    );
    assert!(controller.is_ready());

    // LTC is still ranked but its short momentum is below -3%
    let orders = controller.on_market_update(day(2), &holding(&["LTCUSD"]));
    assert_eq!(
        orders,
        vec![
            OrderInstruction::Liquidate {
                symbol: Symbol::new("LTCUSD"),
            },
            OrderInstruction::SetHoldings {
                symbol: Symbol::new("BTCUSD"),
                target_weight: dec!(0.18),
            },
            OrderInstruction::SetHoldings {
                symbol: Symbol::new("ETHUSD"),
                target_weight: dec!(0.18),
            },
        ]
    );
    assert_eq!(controller.last_rebalance(), Some(day(2)));
}

#[test]
fn test_downturn_liquidates_only_held_assets() {
    let mut controller =
        RebalanceController::from_tickers(short_config(), &["BTCUSD", "ETHUSD"]).unwrap();
    feed(
        &mut controller,
        &[
            &[("BTCUSD", dec!(100)), ("ETHUSD", dec!(100))],
            &[("BTCUSD", dec!(95)), ("ETHUSD", dec!(90))],
            &[("BTCUSD", dec!(90)), ("ETHUSD", dec!(80))],
        ],
    );

    let orders = controller.on_market_update(day(2), &holding(&["ETHUSD"]));
    assert_eq!(
        orders,
        vec![OrderInstruction::Liquidate {
            symbol: Symbol::new("ETHUSD"),
        }]
    );

    // The downturn branch still consumes the rebalance window
    assert_eq!(controller.last_rebalance(), Some(day(2)));
    assert!(controller
        .on_market_update(day(2) + Duration::hours(12), &holding(&["ETHUSD"]))
        .is_empty());
}

#[test]
fn test_no_orders_while_warming_up() {
    let mut controller =
        RebalanceController::from_tickers(StrategyConfig::default(), &["BTCUSD"]).unwrap();
    feed(&mut controller, &[&[("BTCUSD", dec!(100))], &[("BTCUSD", dec!(200))]]);

    assert!(!controller.is_ready());
    assert!(controller
        .on_market_update(day(1), &PortfolioSnapshot::cash_only(dec!(1000)))
        .is_empty());
    assert!(controller.last_rebalance().is_none());
}

#[test]
fn test_rejects_duplicate_tickers() {
    assert!(RebalanceController::from_tickers(short_config(), &["BTCUSD", "btcusd"]).is_err());
    let empty: [&str; 0] = [];
    assert!(RebalanceController::from_tickers(short_config(), &empty).is_err());
}
