//! Cross-sectional ranking and buy/hold/sell set logic
//!
//! Pure functions over a ready roster. Calling them repeatedly on the same
//! roster yields the same result; the only side effect is debug logging
//! from the signal predicates.

use rust_decimal::Decimal;
use std::collections::HashSet;

use super::Selection;
use crate::config::StrategyConfig;
use crate::data::Symbol;
use crate::momentum::MomentumIndicator;
use crate::signal::AssetSignal;

/// Mean long momentum across the roster
pub fn average_momentum<I: MomentumIndicator>(roster: &[AssetSignal<I>]) -> Decimal {
    if roster.is_empty() {
        return Decimal::ZERO;
    }
    let total: Decimal = roster.iter().map(|asset| asset.long_momentum()).sum();
    total / Decimal::from(roster.len())
}

/// Roster sorted by long momentum, best first
///
/// Stable: equal momentum keeps roster order.
pub fn rank<I: MomentumIndicator>(roster: &[AssetSignal<I>]) -> Vec<&AssetSignal<I>> {
    let mut ranked: Vec<&AssetSignal<I>> = roster.iter().collect();
    ranked.sort_by(|a, b| b.long_momentum().cmp(&a.long_momentum()));
    ranked
}

/// Apply the buy/hold/sell rules to a ready roster
pub fn select<I: MomentumIndicator>(roster: &[AssetSignal<I>], config: &StrategyConfig) -> Selection {
    let ranked = rank(roster);
    let buy_count = config.buy_limit.min(ranked.len());
    let keep_count = config.hold_limit.min(ranked.len());

    let buy_candidates = &ranked[..buy_count];
    let keep_candidates = &ranked[..keep_count];

    let kept: HashSet<&Symbol> = keep_candidates.iter().map(|a| a.symbol()).collect();

    // Outside the hold band, or kept by rank but failing its own short signal
    let sells: Vec<Symbol> = roster
        .iter()
        .filter(|asset| !kept.contains(asset.symbol()) || asset.is_potential_sell())
        .map(|asset| asset.symbol().clone())
        .collect();

    let sold: HashSet<&Symbol> = sells.iter().collect();
    let buys: Vec<Symbol> = buy_candidates
        .iter()
        .filter(|asset| !sold.contains(asset.symbol()) && asset.is_potential_buy())
        .map(|asset| asset.symbol().clone())
        .collect();

    Selection {
        ranked: ranked.iter().map(|a| a.symbol().clone()).collect(),
        buy_candidates: buy_candidates.iter().map(|a| a.symbol().clone()).collect(),
        keep_candidates: keep_candidates.iter().map(|a| a.symbol().clone()).collect(),
        sells,
        buys,
    }
}
