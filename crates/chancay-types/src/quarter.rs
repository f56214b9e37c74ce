//! Reporting quarter identifiers and completion records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::QuarterError;

/// A reporting quarter of the statement data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuarterId {
    /// Calendar year of the reporting period.
    pub year: i32,
    /// Quarter within the year (1 through 4).
    pub quarter: u8,
}

impl QuarterId {
    /// Creates a new quarter identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if `quarter` is outside `1..=4`.
    pub const fn new(year: i32, quarter: u8) -> Result<Self, QuarterError> {
        if quarter == 0 || quarter > 4 {
            return Err(QuarterError::InvalidQuarter(quarter));
        }
        Ok(Self { year, quarter })
    }

    /// Parses a quarter from a statement archive name such as
    /// `gpcw20231231.zip`.
    ///
    /// The embedded date is the reporting period end; only month 3, 6,
    /// 9, or 12 maps to a quarter. Anything else yields `None`.
    #[must_use]
    pub fn from_archive_name(name: &str) -> Option<Self> {
        let date_str = name.strip_prefix("gpcw")?.strip_suffix(".zip")?;
        if date_str.len() != 8 {
            return None;
        }

        let year: i32 = date_str[..4].parse().ok()?;
        let month: u32 = date_str[4..6].parse().ok()?;

        let quarter = match month {
            3 => 1,
            6 => 2,
            9 => 3,
            12 => 4,
            _ => return None,
        };

        Some(Self { year, quarter })
    }
}

impl std::fmt::Display for QuarterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}Q{}", self.year, self.quarter)
    }
}

/// A completed quarter as recorded in the ledger.
///
/// Created once a quarter's batch has been fully applied; immutable
/// afterward. Used only for skip-decisions on resume — the store itself
/// remains the source of truth for which records exist.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuarterRecord {
    /// The completed quarter.
    pub quarter: QuarterId,
    /// Number of records imported when the quarter was completed.
    pub record_count: u64,
    /// When the quarter's final batch committed.
    pub completed_at: DateTime<Utc>,
}

impl QuarterRecord {
    /// Creates a completion record stamped with the current time.
    #[must_use]
    pub fn new(quarter: QuarterId, record_count: u64) -> Self {
        Self {
            quarter,
            record_count,
            completed_at: Utc::now(),
        }
    }
}
