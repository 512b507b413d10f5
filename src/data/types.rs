//! Market data types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tradable symbol handle (e.g., "BTCUSD")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Register a ticker as a symbol. Tickers are upper-cased.
    pub fn new(ticker: impl AsRef<str>) -> Self {
        Self(ticker.as_ref().trim().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(ticker: &str) -> Self {
        Self::new(ticker)
    }
}

impl From<String> for Symbol {
    fn from(ticker: String) -> Self {
        Self::new(ticker)
    }
}

/// A closed daily bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Symbol the bar belongs to
    pub symbol: Symbol,
    /// Bar close time
    pub timestamp: DateTime<Utc>,
    /// Close price
    pub close: Decimal,
}

impl Bar {
    pub fn new(symbol: impl Into<Symbol>, timestamp: DateTime<Utc>, close: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            timestamp,
            close,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_symbol_normalized() {
        let symbol = Symbol::new(" btcusd ");
        assert_eq!(symbol.as_str(), "BTCUSD");
        assert_eq!(symbol, Symbol::from("BTCUSD"));
        assert_eq!(symbol.to_string(), "BTCUSD");
    }

    #[test]
    fn test_symbol_serializes_as_string() {
        let json = serde_json::to_string(&Symbol::new("XRPUSD")).unwrap();
        assert_eq!(json, "\"XRPUSD\"");
    }

    #[test]
    fn test_bar_creation() {
        let now = Utc::now();
        let bar = Bar::new("ltcusd", now, dec!(41.7));
        assert_eq!(bar.symbol.as_str(), "LTCUSD");
        assert_eq!(bar.close, dec!(41.7));
        assert_eq!(bar.timestamp, now);
    }
}
