//! Benchmarks for roster ranking and the rebalance decision

use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_decimal::Decimal;
use triple_momentum::config::{StrategyConfig, CRYPTO_TICKERS};
use triple_momentum::data::Bar;
use triple_momentum::strategy::{rank, select, RebalanceController};

/// Controller over the default universe, fed until every indicator is ready
fn ready_controller() -> RebalanceController {
    let config = StrategyConfig::default();
    let mut controller =
        RebalanceController::from_tickers(config.clone(), &CRYPTO_TICKERS).unwrap();
    let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
    let mut closes = vec![Decimal::from(1000); CRYPTO_TICKERS.len()];

    for day in 0..=config.long_momentum_window as i64 {
        let ts = start + Duration::days(day);
        for (i, ticker) in CRYPTO_TICKERS.iter().enumerate() {
            controller.on_bar(&Bar::new(*ticker, ts, closes[i]));
            // Asset i drifts by (i - 6) percent a day
            closes[i] = closes[i] * Decimal::from(100 + i as i64 - 6) / Decimal::from(100);
        }
    }
    assert!(controller.is_ready());
    controller
}

fn benchmark_rank(c: &mut Criterion) {
    let controller = ready_controller();

    c.bench_function("rank_12_assets", |b| {
        b.iter(|| rank(black_box(controller.roster())).len())
    });
}

fn benchmark_select(c: &mut Criterion) {
    let controller = ready_controller();

    c.bench_function("select_12_assets", |b| {
        b.iter(|| select(black_box(controller.roster()), controller.config()))
    });
}

fn benchmark_decide(c: &mut Criterion) {
    let controller = ready_controller();

    c.bench_function("decide_12_assets", |b| {
        b.iter(|| black_box(&controller).decide())
    });
}

criterion_group!(benches, benchmark_rank, benchmark_select, benchmark_decide);
criterion_main!(benches);
