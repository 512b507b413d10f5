//! Execution types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::data::Symbol;

/// Order identifier
pub type OrderId = Uuid;

/// Trade direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

/// A fill (executed trade)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fill {
    /// Order ID
    pub order_id: OrderId,
    /// Traded symbol
    pub symbol: Symbol,
    /// Trade side
    pub side: OrderSide,
    /// Fill price
    pub price: Decimal,
    /// Filled quantity (always positive)
    pub quantity: Decimal,
    /// Fill timestamp
    pub timestamp: DateTime<Utc>,
    /// Fees paid
    pub fees: Decimal,
}

impl Fill {
    /// Traded notional before fees
    pub fn notional(&self) -> Decimal {
        self.price * self.quantity
    }
}

/// Execution errors
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// No price has been seen for the symbol yet
    #[error("No market price for {0}")]
    NoPrice(String),
    /// Target weight outside [0, 1]
    #[error("Invalid target weight {weight} for {symbol}")]
    InvalidWeight { symbol: String, weight: Decimal },
    /// Configured mode has no engine
    #[error("Execution mode {0} is not supported")]
    Unsupported(String),
}
