//! Rebalance controller
//!
//! Owns the roster and the last rebalance time. The host feeds bars with
//! [`RebalanceController::on_bar`] and asks for orders with
//! [`RebalanceController::on_market_update`]; executing them is left to an
//! execution engine.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::selection::{average_momentum, select};
use super::{OrderInstruction, PortfolioSnapshot, RebalanceDecision};
use crate::config::{ConfigError, StrategyConfig};
use crate::data::{Bar, Symbol};
use crate::momentum::{MomentumIndicator, MomentumPercent};
use crate::signal::AssetSignal;

/// Periodic momentum rotation over a fixed roster
#[derive(Debug)]
pub struct RebalanceController<I = MomentumPercent> {
    config: StrategyConfig,
    roster: Vec<AssetSignal<I>>,
    last_rebalance: Option<DateTime<Utc>>,
}

impl RebalanceController<MomentumPercent> {
    /// Register every ticker with MOMP indicators
    pub fn from_tickers<S: AsRef<str>>(
        config: StrategyConfig,
        tickers: &[S],
    ) -> Result<Self, ConfigError> {
        let roster = tickers
            .iter()
            .map(|t| AssetSignal::from_config(Symbol::new(t), &config))
            .collect();
        Self::new(config, roster)
    }
}

impl<I: MomentumIndicator> RebalanceController<I> {
    /// Create a controller over a fixed roster
    pub fn new(config: StrategyConfig, roster: Vec<AssetSignal<I>>) -> Result<Self, ConfigError> {
        config.validate()?;
        if roster.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }
        for (i, asset) in roster.iter().enumerate() {
            if roster[..i].iter().any(|a| a.symbol() == asset.symbol()) {
                return Err(ConfigError::DuplicateTicker(asset.symbol().to_string()));
            }
        }

        Ok(Self {
            config,
            roster,
            last_rebalance: None,
        })
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    pub fn roster(&self) -> &[AssetSignal<I>] {
        &self.roster
    }

    pub fn last_rebalance(&self) -> Option<DateTime<Utc>> {
        self.last_rebalance
    }

    /// Route a bar to its asset. Returns false for symbols outside the roster.
    pub fn on_bar(&mut self, bar: &Bar) -> bool {
        match self.roster.iter_mut().find(|a| a.symbol() == &bar.symbol) {
            Some(asset) => {
                asset.update(bar);
                true
            }
            None => false,
        }
    }

    /// Every asset has data and warmed-up indicators
    pub fn is_ready(&self) -> bool {
        self.roster.iter().all(|a| a.is_ready())
    }

    /// Enough time has passed since the last rebalance
    pub fn is_rebalance_due(&self, now: DateTime<Utc>) -> bool {
        match self.last_rebalance {
            None => true,
            Some(last) => now - last >= self.config.rebalance_window(),
        }
    }

    /// Mean long momentum of the roster
    pub fn average_momentum(&self) -> Decimal {
        average_momentum(&self.roster)
    }

    /// Decide the branch and sets for the current roster state
    ///
    /// Does not mutate anything; the caller must check readiness first.
    pub fn decide(&self) -> RebalanceDecision {
        let average = self.average_momentum();
        if average < Decimal::ZERO {
            RebalanceDecision::LiquidateAll {
                average_momentum: average,
            }
        } else {
            RebalanceDecision::Rotate(select(&self.roster, &self.config))
        }
    }

    /// Handle a data update and return the orders to execute
    ///
    /// Returns nothing while any asset is warming up or the rebalance window
    /// has not elapsed. Otherwise the rebalance time advances to `now`,
    /// whichever branch runs.
    pub fn on_market_update(
        &mut self,
        now: DateTime<Utc>,
        portfolio: &PortfolioSnapshot,
    ) -> Vec<OrderInstruction> {
        if !self.is_ready() || !self.is_rebalance_due(now) {
            return vec![];
        }

        tracing::info!(
            time = %now,
            cash = %portfolio.cash,
            total_value = %portfolio.total_value,
            open_positions = portfolio.open_positions(),
            "Rebalancing"
        );
        self.last_rebalance = Some(now);

        let decision = self.decide();
        self.instructions_for(&decision, portfolio)
    }

    /// Turn a decision into orders given current holdings
    pub fn instructions_for(
        &self,
        decision: &RebalanceDecision,
        portfolio: &PortfolioSnapshot,
    ) -> Vec<OrderInstruction> {
        let mut orders = Vec::new();

        match decision {
            RebalanceDecision::LiquidateAll { average_momentum } => {
                tracing::info!(
                    average_momentum = %average_momentum,
                    "Market-wide downturn, exiting all positions"
                );
                for asset in &self.roster {
                    if portfolio.is_invested(asset.symbol()) {
                        tracing::info!(asset = %asset, "Sell");
                        orders.push(OrderInstruction::Liquidate {
                            symbol: asset.symbol().clone(),
                        });
                    }
                }
            }
            RebalanceDecision::Rotate(selection) => {
                for symbol in &selection.sells {
                    if portfolio.is_invested(symbol) {
                        if let Some(asset) = self.asset(symbol) {
                            tracing::info!(asset = %asset, "Sell");
                        }
                        orders.push(OrderInstruction::Liquidate {
                            symbol: symbol.clone(),
                        });
                    }
                }

                let target_weight = self.config.target_weight();
                for symbol in &selection.buys {
                    if !portfolio.is_invested(symbol) {
                        if let Some(asset) = self.asset(symbol) {
                            tracing::info!(asset = %asset, %target_weight, "Buy");
                        }
                        orders.push(OrderInstruction::SetHoldings {
                            symbol: symbol.clone(),
                            target_weight,
                        });
                    }
                }
            }
        }

        orders
    }

    fn asset(&self, symbol: &Symbol) -> Option<&AssetSignal<I>> {
        self.roster.iter().find(|a| a.symbol() == symbol)
    }
}
