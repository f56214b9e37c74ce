//! Raw day-file record representation.

use chancay_types::Bar;
use chrono::NaiveDate;

/// Raw record as read from a binary day file (before normalization).
///
/// The format stores one trading day as 32 bytes in little-endian order:
/// - `u32`: date as decimal YYYYMMDD (e.g., 20230105)
/// - `u32`: open price in fen (hundredths of a yuan)
/// - `u32`: high price in fen
/// - `u32`: low price in fen
/// - `u32`: close price in fen
/// - `f32`: turnover in yuan
/// - `u32`: volume in shares
/// - `u32`: reserved (ignored)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawDayRecord {
    /// Decimal-encoded YYYYMMDD trading date.
    pub date_raw: u32,
    /// Raw open price in fen.
    pub open_raw: u32,
    /// Raw high price in fen.
    pub high_raw: u32,
    /// Raw low price in fen.
    pub low_raw: u32,
    /// Raw close price in fen.
    pub close_raw: u32,
    /// Turnover in yuan.
    pub turnover: f32,
    /// Volume in shares.
    pub volume: u32,
}

impl RawDayRecord {
    /// Size in bytes of a raw day record.
    pub const SIZE: usize = 32;

    /// Fen per yuan: raw integer prices divide by this.
    pub const PRICE_SCALE: f64 = 100.0;

    /// Creates a new raw record.
    #[must_use]
    pub const fn new(
        date_raw: u32,
        open_raw: u32,
        high_raw: u32,
        low_raw: u32,
        close_raw: u32,
        turnover: f32,
        volume: u32,
    ) -> Self {
        Self {
            date_raw,
            open_raw,
            high_raw,
            low_raw,
            close_raw,
            turnover,
            volume,
        }
    }

    /// Splits the decimal date into `(year, month, day)` digits.
    #[must_use]
    pub const fn date_parts(&self) -> (u32, u32, u32) {
        let year = self.date_raw / 10_000;
        let month = (self.date_raw / 100) % 100;
        let day = self.date_raw % 100;
        (year, month, day)
    }

    /// Returns true if the decimal date's digits are in plausible ranges:
    /// year in [1990, 2100], month in [1, 12], day in [1, 31].
    ///
    /// The day is deliberately not validated against the month here,
    /// matching the source format's own leniency. A digit-plausible date
    /// that is not a real calendar day (e.g., 20230230) still fails
    /// [`Self::date`], since it cannot be represented.
    #[must_use]
    pub const fn date_plausible(&self) -> bool {
        let (year, month, day) = self.date_parts();
        year >= 1990 && year <= 2100 && month >= 1 && month <= 12 && day >= 1 && day <= 31
    }

    /// Decodes the trading date, or `None` if the digits are implausible
    /// or the date is not a real calendar day.
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        if !self.date_plausible() {
            return None;
        }

        let (year, month, day) = self.date_parts();
        NaiveDate::from_ymd_opt(year as i32, month, day)
    }

    /// Normalizes the raw record into a [`Bar`] for the given symbol.
    ///
    /// Returns `None` if the record's date digits are implausible; such
    /// records are skipped, never an error.
    #[must_use]
    pub fn normalize(&self, symbol: &str) -> Option<Bar> {
        let date = self.date()?;

        Some(Bar::new(
            symbol,
            date,
            f64::from(self.open_raw) / Self::PRICE_SCALE,
            f64::from(self.high_raw) / Self::PRICE_SCALE,
            f64::from(self.low_raw) / Self::PRICE_SCALE,
            f64::from(self.close_raw) / Self::PRICE_SCALE,
            u64::from(self.volume),
            f64::from(self.turnover),
        ))
    }
}
