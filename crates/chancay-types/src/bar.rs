//! Daily OHLCV bar representation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading day's OHLCV observation for a single instrument.
///
/// Prices are in yuan (decoded from integer fen in the source format),
/// `volume` is in shares, `turnover` is total traded value in yuan.
/// Bars are never mutated after decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Canonical instrument code (e.g., "600000.SS").
    pub symbol: String,
    /// Trading date (no time component).
    pub date: NaiveDate,
    /// Opening price.
    pub open: f64,
    /// Highest price.
    pub high: f64,
    /// Lowest price.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Trading volume in shares.
    pub volume: u64,
    /// Total traded value in yuan.
    pub turnover: f64,
}

impl Bar {
    /// Creates a new bar.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        symbol: impl Into<String>,
        date: NaiveDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
        turnover: f64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            date,
            open,
            high,
            low,
            close,
            volume,
            turnover,
        }
    }

    /// Returns the price range (high - low).
    #[must_use]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Returns true if the close lies within `[low, high]`.
    #[must_use]
    pub fn close_in_range(&self) -> bool {
        self.close >= self.low && self.close <= self.high
    }
}

impl std::fmt::Display for Bar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} O:{:.2} H:{:.2} L:{:.2} C:{:.2} V:{}",
            self.symbol, self.date, self.open, self.high, self.low, self.close, self.volume
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_bar() -> Bar {
        let date = NaiveDate::from_ymd_opt(2023, 1, 5).unwrap();
        Bar::new("600000.SS", date, 7.30, 7.45, 7.25, 7.40, 25_000_000, 1.83e8)
    }

    #[test]
    fn test_range() {
        let bar = test_bar();
        assert!((bar.range() - 0.20).abs() < 1e-10);
    }

    #[test]
    fn test_close_in_range() {
        let mut bar = test_bar();
        assert!(bar.close_in_range());

        bar.close = 7.50;
        assert!(!bar.close_in_range());
    }

}
