//! Execution engine module
//!
//! Carries out the strategy's order instructions and keeps the book

mod paper;
mod types;

pub use paper::PaperEngine;
pub use types::{ExecutionError, Fill, OrderId, OrderSide};

use async_trait::async_trait;

use crate::strategy::{OrderInstruction, PortfolioSnapshot};

/// Trait for execution engine implementations
#[async_trait]
pub trait ExecutionEngine: Send + Sync {
    /// Execute one instruction. `None` when nothing needed to trade.
    async fn execute(&self, instruction: &OrderInstruction)
        -> Result<Option<Fill>, ExecutionError>;
    /// Current cash, value and holdings
    async fn portfolio(&self) -> PortfolioSnapshot;
    /// Get all fills
    async fn fills(&self) -> Vec<Fill>;
}
