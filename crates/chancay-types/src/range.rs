//! Stored per-symbol date range metadata.

use chrono::NaiveDate;

use crate::RangeError;

/// The date range already stored for a symbol, as reported by the store.
///
/// A symbol with no prior history has no range at all; callers pass
/// `Option<ExistingRange>` where `None` means first-ever ingest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExistingRange {
    /// Earliest stored trading date (inclusive).
    pub min_date: NaiveDate,
    /// Latest stored trading date (inclusive).
    pub max_date: NaiveDate,
}

impl ExistingRange {
    /// Creates a new range, validating that `min_date <= max_date`.
    ///
    /// # Errors
    ///
    /// Returns an error if `min_date > max_date`.
    pub fn new(min_date: NaiveDate, max_date: NaiveDate) -> Result<Self, RangeError> {
        if min_date > max_date {
            return Err(RangeError::Inverted { min_date, max_date });
        }
        Ok(Self { min_date, max_date })
    }

    /// Builds a range from the two independent store queries.
    ///
    /// Returns `Ok(None)` when either endpoint is absent (no history).
    ///
    /// # Errors
    ///
    /// Returns an error if the store reports `min > max`.
    pub fn from_endpoints(
        min_date: Option<NaiveDate>,
        max_date: Option<NaiveDate>,
    ) -> Result<Option<Self>, RangeError> {
        match (min_date, max_date) {
            (Some(min), Some(max)) => Self::new(min, max).map(Some),
            _ => Ok(None),
        }
    }

    /// Returns true if the given date is already covered by this range.
    #[must_use]
    pub fn covers(&self, date: NaiveDate) -> bool {
        date >= self.min_date && date <= self.max_date
    }
}

impl std::fmt::Display for ExistingRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.min_date, self.max_date)
    }
}
