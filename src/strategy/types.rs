//! Strategy types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::data::Symbol;

/// An order the strategy wants the host to carry out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum OrderInstruction {
    /// Close the position fully
    Liquidate { symbol: Symbol },
    /// Trade toward `target_weight` of total portfolio value
    SetHoldings {
        symbol: Symbol,
        target_weight: Decimal,
    },
}

impl OrderInstruction {
    pub fn symbol(&self) -> &Symbol {
        match self {
            OrderInstruction::Liquidate { symbol } => symbol,
            OrderInstruction::SetHoldings { symbol, .. } => symbol,
        }
    }

    pub fn is_liquidate(&self) -> bool {
        matches!(self, OrderInstruction::Liquidate { .. })
    }
}

impl fmt::Display for OrderInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderInstruction::Liquidate { symbol } => write!(f, "LIQUIDATE {}", symbol),
            OrderInstruction::SetHoldings {
                symbol,
                target_weight,
            } => write!(f, "SET_HOLDINGS {} {}", symbol, target_weight),
        }
    }
}

/// Portfolio state the host reports before a decision
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    /// Free cash
    pub cash: Decimal,
    /// Cash plus marked holdings
    pub total_value: Decimal,
    /// Quantity held per symbol
    pub holdings: HashMap<Symbol, Decimal>,
}

impl PortfolioSnapshot {
    /// All-cash portfolio
    pub fn cash_only(cash: Decimal) -> Self {
        Self {
            cash,
            total_value: cash,
            holdings: HashMap::new(),
        }
    }

    /// Non-zero position in `symbol`
    pub fn is_invested(&self, symbol: &Symbol) -> bool {
        self.holdings
            .get(symbol)
            .map_or(false, |quantity| !quantity.is_zero())
    }

    /// Number of non-zero positions
    pub fn open_positions(&self) -> usize {
        self.holdings.values().filter(|q| !q.is_zero()).count()
    }
}

/// Ranking and set logic of one selection cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    /// Roster sorted by long momentum, best first
    pub ranked: Vec<Symbol>,
    /// Top `buy_limit` of the ranking
    pub buy_candidates: Vec<Symbol>,
    /// Top `hold_limit` of the ranking
    pub keep_candidates: Vec<Symbol>,
    /// Assets to exit, in roster order
    pub sells: Vec<Symbol>,
    /// Assets to enter, in rank order
    pub buys: Vec<Symbol>,
}

/// Outcome of the decision step for a ready roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "branch", rename_all = "snake_case")]
pub enum RebalanceDecision {
    /// Average long momentum is negative: exit everything
    LiquidateAll { average_momentum: Decimal },
    /// Rank, keep the leaders, rotate out the rest
    Rotate(Selection),
}
