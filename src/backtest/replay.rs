//! Event-driven replay of stored bars

use chrono::{DateTime, Utc};
use std::collections::VecDeque;

use crate::data::Bar;

/// All bars sharing one timestamp
#[derive(Debug, Clone, PartialEq)]
pub struct MarketSlice {
    pub timestamp: DateTime<Utc>,
    pub bars: Vec<Bar>,
}

/// Yields bars as time-ordered slices
pub struct EventStream {
    bars: VecDeque<Bar>,
}

impl EventStream {
    /// Create a stream from bars in any order
    pub fn new(mut bars: Vec<Bar>) -> Self {
        // Stable: within a timestamp, bars keep their load order
        bars.sort_by_key(|b| b.timestamp);
        Self { bars: bars.into() }
    }

    fn next_slice(&mut self) -> Option<MarketSlice> {
        let first = self.bars.pop_front()?;
        let timestamp = first.timestamp;
        let mut bars = vec![first];

        while let Some(bar) = self.bars.front() {
            if bar.timestamp != timestamp {
                break;
            }
            if let Some(bar) = self.bars.pop_front() {
                bars.push(bar);
            }
        }

        Some(MarketSlice { timestamp, bars })
    }
}

impl Iterator for EventStream {
    type Item = MarketSlice;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;

    #[test]
    fn test_groups_by_timestamp_in_order() {
        let t0 = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let t1 = t0 + Duration::days(1);
        let bars = vec![
            Bar::new("BTCUSD", t1, dec!(2)),
            Bar::new("BTCUSD", t0, dec!(1)),
            Bar::new("ETCUSD", t0, dec!(3)),
            Bar::new("ETCUSD", t1, dec!(4)),
        ];

        let mut stream = EventStream::new(bars);

        let first = stream.next().unwrap();
        assert_eq!(first.timestamp, t0);
        assert_eq!(first.bars.len(), 2);
        assert_eq!(first.bars[0].symbol.as_str(), "BTCUSD");
        assert_eq!(first.bars[1].symbol.as_str(), "ETCUSD");

        let second = stream.next().unwrap();
        assert_eq!(second.timestamp, t1);
        assert_eq!(second.bars.len(), 2);

        assert!(stream.next().is_none());
    }

    #[test]
    fn test_empty_stream() {
        let mut stream = EventStream::new(vec![]);
        assert!(stream.next().is_none());
    }
}
