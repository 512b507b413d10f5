//! Integration test suite

mod backtest_test;
mod e2e_test;
mod strategy_test;
