//! Paper trading execution engine

use super::{ExecutionEngine, ExecutionError, Fill, OrderId, OrderSide};
use crate::config::{AccountType, ExecutionConfig};
use crate::data::{Bar, Symbol};
use crate::strategy::{OrderInstruction, PortfolioSnapshot};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Quantity precision for crypto lots
const QUANTITY_DP: u32 = 8;

#[derive(Debug, Default)]
struct Book {
    cash: Decimal,
    holdings: HashMap<Symbol, Decimal>,
    prices: HashMap<Symbol, Decimal>,
    fills: Vec<Fill>,
    clock: Option<DateTime<Utc>>,
}

impl Book {
    fn holdings_value(&self) -> Decimal {
        self.holdings
            .iter()
            .map(|(symbol, quantity)| {
                let price = self.prices.get(symbol).copied().unwrap_or_default();
                *quantity * price
            })
            .sum()
    }

    fn total_value(&self) -> Decimal {
        self.cash + self.holdings_value()
    }

    fn price(&self, symbol: &Symbol) -> Result<Decimal, ExecutionError> {
        match self.prices.get(symbol) {
            Some(price) if *price > Decimal::ZERO => Ok(*price),
            _ => Err(ExecutionError::NoPrice(symbol.to_string())),
        }
    }

    fn record(
        &mut self,
        symbol: &Symbol,
        side: OrderSide,
        quantity: Decimal,
        price: Decimal,
        fee_rate: Decimal,
    ) -> Fill {
        let notional = quantity * price;
        let fees = notional * fee_rate;
        let held = self.holdings.entry(symbol.clone()).or_default();

        match side {
            OrderSide::Buy => {
                *held += quantity;
                self.cash -= notional + fees;
            }
            OrderSide::Sell => {
                *held -= quantity;
                self.cash += notional - fees;
            }
        }
        if held.is_zero() {
            self.holdings.remove(symbol);
        }

        let fill = Fill {
            order_id: OrderId::new_v4(),
            symbol: symbol.clone(),
            side,
            price,
            quantity,
            timestamp: self.clock.unwrap_or_else(Utc::now),
            fees,
        };
        self.fills.push(fill.clone());
        fill
    }
}

/// Paper trading engine with immediate fills at the last close
pub struct PaperEngine {
    fee_rate: Decimal,
    account_type: AccountType,
    book: Arc<RwLock<Book>>,
}

impl PaperEngine {
    /// Create a cash-account paper engine
    pub fn new(initial_cash: Decimal, fee_rate: Decimal) -> Self {
        Self {
            fee_rate,
            account_type: AccountType::Cash,
            book: Arc::new(RwLock::new(Book {
                cash: initial_cash,
                ..Default::default()
            })),
        }
    }

    /// Create from the execution config (brokerage fees and account type)
    pub fn from_config(initial_cash: Decimal, config: &ExecutionConfig) -> Self {
        Self::new(initial_cash, config.effective_fee_rate()).with_account_type(config.account_type)
    }

    pub fn with_account_type(mut self, account_type: AccountType) -> Self {
        self.account_type = account_type;
        self
    }

    /// Mark a symbol to the bar's close and advance the clock
    pub async fn mark(&self, bar: &Bar) {
        let mut book = self.book.write().await;
        book.prices.insert(bar.symbol.clone(), bar.close);
        if book.clock.map_or(true, |c| bar.timestamp > c) {
            book.clock = Some(bar.timestamp);
        }
    }

    async fn liquidate(&self, symbol: &Symbol) -> Result<Option<Fill>, ExecutionError> {
        let mut book = self.book.write().await;
        let quantity = book.holdings.get(symbol).copied().unwrap_or_default();
        if quantity.is_zero() {
            return Ok(None);
        }

        let price = book.price(symbol)?;
        Ok(Some(book.record(
            symbol,
            OrderSide::Sell,
            quantity,
            price,
            self.fee_rate,
        )))
    }

    async fn set_holdings(
        &self,
        symbol: &Symbol,
        target_weight: Decimal,
    ) -> Result<Option<Fill>, ExecutionError> {
        if target_weight < Decimal::ZERO || target_weight > Decimal::ONE {
            return Err(ExecutionError::InvalidWeight {
                symbol: symbol.to_string(),
                weight: target_weight,
            });
        }

        let mut book = self.book.write().await;
        let price = book.price(symbol)?;
        let held = book.holdings.get(symbol).copied().unwrap_or_default();

        let target_value = book.total_value() * target_weight;
        let delta = target_value - held * price;

        if delta > Decimal::ZERO {
            let mut spend = delta;
            if self.account_type == AccountType::Cash {
                // Leave room for the fee
                let affordable = (book.cash / (Decimal::ONE + self.fee_rate)).max(Decimal::ZERO);
                spend = spend.min(affordable);
            }
            let quantity = (spend / price)
                .round_dp_with_strategy(QUANTITY_DP, RoundingStrategy::ToZero);
            if quantity.is_zero() {
                return Ok(None);
            }
            Ok(Some(book.record(
                symbol,
                OrderSide::Buy,
                quantity,
                price,
                self.fee_rate,
            )))
        } else if delta < Decimal::ZERO {
            let quantity = (-delta / price)
                .round_dp_with_strategy(QUANTITY_DP, RoundingStrategy::ToZero)
                .min(held);
            if quantity.is_zero() {
                return Ok(None);
            }
            Ok(Some(book.record(
                symbol,
                OrderSide::Sell,
                quantity,
                price,
                self.fee_rate,
            )))
        } else {
            Ok(None)
        }
    }
}

#[async_trait]
impl ExecutionEngine for PaperEngine {
    async fn execute(
        &self,
        instruction: &OrderInstruction,
    ) -> Result<Option<Fill>, ExecutionError> {
        let fill = match instruction {
            OrderInstruction::Liquidate { symbol } => self.liquidate(symbol).await?,
            OrderInstruction::SetHoldings {
                symbol,
                target_weight,
            } => self.set_holdings(symbol, *target_weight).await?,
        };

        match &fill {
            Some(fill) => tracing::info!(
                order_id = ?fill.order_id,
                symbol = %fill.symbol,
                side = ?fill.side,
                quantity = %fill.quantity,
                price = %fill.price,
                fees = %fill.fees,
                "Paper order filled"
            ),
            None => tracing::debug!(%instruction, "Nothing to trade"),
        }

        Ok(fill)
    }

    async fn portfolio(&self) -> PortfolioSnapshot {
        let book = self.book.read().await;
        PortfolioSnapshot {
            cash: book.cash,
            total_value: book.total_value(),
            holdings: book.holdings.clone(),
        }
    }

    async fn fills(&self) -> Vec<Fill> {
        let book = self.book.read().await;
        book.fills.clone()
    }
}
