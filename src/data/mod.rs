//! Historical bar storage
//!
//! Daily close bars per ticker, stored as Parquet for backtesting

mod parquet;
mod types;

pub use self::parquet::{bar_schema, BarStore};
pub use types::{Bar, Symbol};

use thiserror::Error;

/// Errors raised while reading or writing bar files
#[derive(Debug, Error)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parquet error: {0}")]
    Parquet(#[from] ::parquet::errors::ParquetError),
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
    #[error("Invalid {0} column")]
    InvalidColumn(&'static str),
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(i64),
    #[error("Invalid price {0:?}: {1}")]
    InvalidPrice(String, rust_decimal::Error),
}
