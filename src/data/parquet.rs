//! Parquet bar files, one per ticker

use arrow::array::{ArrayRef, StringArray, TimestampMicrosecondArray};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use chrono::{DateTime, Utc};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use rust_decimal::Decimal;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use super::{Bar, DataError, Symbol};

/// Bar schema fields
pub fn bar_schema() -> Schema {
    Schema::new(vec![
        Field::new(
            "timestamp",
            DataType::Timestamp(TimeUnit::Microsecond, Some("UTC".into())),
            false,
        ),
        Field::new("symbol", DataType::Utf8, false),
        Field::new("close", DataType::Utf8, false), // Store as string for Decimal precision
    ])
}

/// Directory of `<TICKER>.parquet` bar files
#[derive(Debug, Clone)]
pub struct BarStore {
    data_dir: PathBuf,
}

impl BarStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// File holding the bars of `symbol`
    pub fn path_for(&self, symbol: &Symbol) -> PathBuf {
        self.data_dir.join(format!("{}.parquet", symbol))
    }

    /// Write bars for one symbol, replacing any existing file
    pub fn write_bars(&self, symbol: &Symbol, bars: &[Bar]) -> Result<PathBuf, DataError> {
        fs::create_dir_all(&self.data_dir)?;

        let path = self.path_for(symbol);
        let schema = Arc::new(bar_schema());
        let file = File::create(&path)?;

        let props = WriterProperties::builder()
            .set_compression(Compression::SNAPPY)
            .build();

        let mut writer = ArrowWriter::try_new(file, schema.clone(), Some(props))?;

        let timestamps: Vec<i64> = bars.iter().map(|b| b.timestamp.timestamp_micros()).collect();
        let symbols: Vec<&str> = bars.iter().map(|b| b.symbol.as_str()).collect();
        let closes: Vec<String> = bars.iter().map(|b| b.close.to_string()).collect();

        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(TimestampMicrosecondArray::from(timestamps).with_timezone("UTC"))
                    as ArrayRef,
                Arc::new(StringArray::from(symbols)) as ArrayRef,
                Arc::new(StringArray::from(
                    closes.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
                )) as ArrayRef,
            ],
        )?;

        writer.write(&batch)?;
        writer.close()?;

        tracing::debug!(path = ?path, count = bars.len(), "Wrote bars to Parquet");

        Ok(path)
    }

    /// Read bars for one symbol within `[start, end)`
    ///
    /// Returns `Ok(None)` when the symbol has no file at all.
    pub fn read_bars(
        &self,
        symbol: &Symbol,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Option<Vec<Bar>>, DataError> {
        let path = self.path_for(symbol);
        if !path.exists() {
            return Ok(None);
        }

        let mut bars = read_file(&path)?;
        bars.retain(|b| {
            start.map_or(true, |s| b.timestamp >= s) && end.map_or(true, |e| b.timestamp < e)
        });
        bars.sort_by_key(|b| b.timestamp);

        Ok(Some(bars))
    }

    /// Read bars for every symbol of the universe
    ///
    /// Missing files are logged and skipped; such an asset never has data.
    pub fn load_universe(
        &self,
        symbols: &[Symbol],
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Vec<Bar>, DataError> {
        let mut all = Vec::new();
        for symbol in symbols {
            match self.read_bars(symbol, start, end)? {
                Some(bars) => {
                    tracing::debug!(%symbol, count = bars.len(), "Loaded bars");
                    all.extend(bars);
                }
                None => {
                    tracing::warn!(%symbol, path = ?self.path_for(symbol), "No bar file for symbol");
                }
            }
        }
        Ok(all)
    }
}

fn read_file(path: &Path) -> Result<Vec<Bar>, DataError> {
    let file = File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut bars = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;

        let timestamps = batch
            .column(0)
            .as_any()
            .downcast_ref::<TimestampMicrosecondArray>()
            .ok_or(DataError::InvalidColumn("timestamp"))?;

        let symbols = batch
            .column(1)
            .as_any()
            .downcast_ref::<StringArray>()
            .ok_or(DataError::InvalidColumn("symbol"))?;

        let closes = batch
            .column(2)
            .as_any()
            .downcast_ref::<StringArray>()
            .ok_or(DataError::InvalidColumn("close"))?;

        for i in 0..batch.num_rows() {
            let micros = timestamps.value(i);
            let timestamp =
                DateTime::from_timestamp_micros(micros).ok_or(DataError::InvalidTimestamp(micros))?;
            let raw = closes.value(i);
            let close = Decimal::from_str(raw)
                .map_err(|e| DataError::InvalidPrice(raw.to_string(), e))?;

            bars.push(Bar {
                symbol: Symbol::new(symbols.value(i)),
                timestamp,
                close,
            });
        }
    }

    Ok(bars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn daily_bars(symbol: &str, closes: &[Decimal]) -> Vec<Bar> {
        let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, c)| Bar::new(symbol, start + Duration::days(i as i64), *c))
            .collect()
    }

    #[test]
    fn test_bar_schema() {
        let schema = bar_schema();
        assert_eq!(schema.fields().len(), 3);
        assert_eq!(schema.field(0).name(), "timestamp");
        assert_eq!(schema.field(1).name(), "symbol");
        assert_eq!(schema.field(2).name(), "close");
    }

    #[test]
    fn test_path_for_symbol() {
        let store = BarStore::new("/data");
        assert_eq!(
            store.path_for(&Symbol::new("BTCUSD")),
            PathBuf::from("/data/BTCUSD.parquet")
        );
    }

    #[test]
    fn test_write_and_read_bars() {
        let temp_dir = TempDir::new().unwrap();
        let store = BarStore::new(temp_dir.path());
        let symbol = Symbol::new("BTCUSD");

        let bars = daily_bars("BTCUSD", &[dec!(7200.17), dec!(6965.72), dec!(7344.88)]);
        store.write_bars(&symbol, &bars).unwrap();

        let read = store.read_bars(&symbol, None, None).unwrap().unwrap();
        assert_eq!(read, bars);
    }

    #[test]
    fn test_read_filters_date_range() {
        let temp_dir = TempDir::new().unwrap();
        let store = BarStore::new(temp_dir.path());
        let symbol = Symbol::new("XRPUSD");

        let bars = daily_bars("XRPUSD", &[dec!(0.19), dec!(0.20), dec!(0.21), dec!(0.22)]);
        store.write_bars(&symbol, &bars).unwrap();

        let start = bars[1].timestamp;
        let end = bars[3].timestamp;
        let read = store
            .read_bars(&symbol, Some(start), Some(end))
            .unwrap()
            .unwrap();

        assert_eq!(read.len(), 2);
        assert_eq!(read[0].close, dec!(0.20));
        assert_eq!(read[1].close, dec!(0.21));
    }

    #[test]
    fn test_missing_file_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = BarStore::new(temp_dir.path());
        let read = store.read_bars(&Symbol::new("BSVUSD"), None, None).unwrap();
        assert!(read.is_none());
    }

    #[test]
    fn test_load_universe_skips_missing() {
        let temp_dir = TempDir::new().unwrap();
        let store = BarStore::new(temp_dir.path());

        let btc = daily_bars("BTCUSD", &[dec!(1), dec!(2)]);
        store.write_bars(&Symbol::new("BTCUSD"), &btc).unwrap();

        let all = store
            .load_universe(&[Symbol::new("BTCUSD"), Symbol::new("VETUSD")], None, None)
            .unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|b| b.symbol.as_str() == "BTCUSD"));
    }
}
