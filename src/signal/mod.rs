//! Per-asset momentum signals
//!
//! Readiness and buy/sell predicates the rebalancer ranks and filters on

mod asset;

pub use asset::AssetSignal;
