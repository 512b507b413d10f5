//! Momentum rotation strategy
//!
//! Once per rebalance window, rank the roster by long momentum, exit the
//! laggards and enter the leaders. A negative market-wide average exits
//! everything instead.

mod controller;
mod selection;
mod types;

pub use controller::RebalanceController;
pub use selection::{average_momentum, rank, select};
pub use types::{OrderInstruction, PortfolioSnapshot, RebalanceDecision, Selection};
