//! Pre-merge data quality gate.
//!
//! Decoded bars pass through [`validate`] before they are eligible for
//! merge planning. Structural problems (empty input, mixed symbols,
//! duplicate or out-of-order dates) are hard failures: they indicate
//! upstream decoding or merge-planning bugs. Value-range anomalies
//! (non-positive close, `high < low`, close outside `[low, high]`,
//! zero-volume days) are soft: real markets produce legitimate edge
//! cases such as halted-day zero volume and corporate-action price
//! resets, so they are counted and logged but never block ingestion.

#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use chancay_types::Bar;
use thiserror::Error;
use tracing::{debug, warn};

/// How hard invariant violations are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Hard violations return an error.
    Strict,
    /// Hard violations are logged; the report records the failure.
    #[default]
    Lenient,
}

/// Hard data quality violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QualityError {
    /// The bar set is empty.
    #[error("{symbol}: empty bar set")]
    Empty {
        /// The symbol being validated.
        symbol: String,
    },

    /// A bar carries a different symbol than the rest of the set.
    #[error("{symbol}: bar at position {position} has symbol {found}")]
    MixedSymbols {
        /// The expected symbol.
        symbol: String,
        /// The offending symbol.
        found: String,
        /// Position of the offending bar.
        position: usize,
    },

    /// Two bars share the same date.
    #[error("{symbol}: duplicate date {date}")]
    DuplicateDate {
        /// The symbol being validated.
        symbol: String,
        /// The duplicated date.
        date: chrono::NaiveDate,
    },

    /// Dates are not in increasing order.
    #[error("{symbol}: dates out of order at position {position} ({date} after {previous})")]
    OutOfOrder {
        /// The symbol being validated.
        symbol: String,
        /// The out-of-order date.
        date: chrono::NaiveDate,
        /// The preceding date.
        previous: chrono::NaiveDate,
        /// Position of the offending bar.
        position: usize,
    },
}

/// Counts of soft value-range issues found in a bar set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QualityReport {
    /// Bars with `close <= 0`.
    pub non_positive_close: usize,
    /// Bars with `high < low`.
    pub high_below_low: usize,
    /// Bars with close outside `[low, high]`.
    pub close_out_of_range: usize,
    /// Bars with zero volume (halted days; informational only).
    pub zero_volume: usize,
    /// The hard failure encountered in lenient mode, if any.
    pub hard_failure: Option<QualityError>,
}

impl QualityReport {
    /// Returns true if no hard invariant was violated.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.hard_failure.is_none()
    }

    /// Total number of soft issues counted.
    #[must_use]
    pub const fn soft_issue_count(&self) -> usize {
        self.non_positive_close + self.high_below_low + self.close_out_of_range
    }
}

/// Validates a decoded bar set before merge planning.
///
/// Checks run in order and short-circuit on the first structural
/// failure: non-empty input, a single shared symbol, strictly
/// increasing dates. Value-range checks are soft and never reject.
///
/// # Errors
///
/// In [`ValidationMode::Strict`], returns the first hard violation. In
/// lenient mode hard violations are logged and recorded on the report;
/// the caller decides whether to persist.
pub fn validate(
    symbol: &str,
    bars: &[Bar],
    mode: ValidationMode,
) -> Result<QualityReport, QualityError> {
    let mut report = QualityReport::default();

    if let Err(e) = check_structure(symbol, bars) {
        match mode {
            ValidationMode::Strict => return Err(e),
            ValidationMode::Lenient => {
                warn!(symbol, error = %e, "quality gate failed");
                report.hard_failure = Some(e);
                return Ok(report);
            }
        }
    }

    for bar in bars {
        if bar.close <= 0.0 {
            report.non_positive_close += 1;
        }
        if bar.high < bar.low {
            report.high_below_low += 1;
        }
        if !bar.close_in_range() {
            report.close_out_of_range += 1;
        }
        if bar.volume == 0 {
            report.zero_volume += 1;
        }
    }

    if report.soft_issue_count() > 0 {
        warn!(
            symbol,
            non_positive_close = report.non_positive_close,
            high_below_low = report.high_below_low,
            close_out_of_range = report.close_out_of_range,
            "value-range issues (soft, not rejected)"
        );
    } else {
        debug!(symbol, bars = bars.len(), "quality gate passed");
    }

    Ok(report)
}

/// Structural (hard) checks: non-empty, single symbol, strictly
/// increasing dates.
fn check_structure(symbol: &str, bars: &[Bar]) -> Result<(), QualityError> {
    if bars.is_empty() {
        return Err(QualityError::Empty {
            symbol: symbol.to_string(),
        });
    }

    for (position, bar) in bars.iter().enumerate() {
        if bar.symbol != symbol {
            return Err(QualityError::MixedSymbols {
                symbol: symbol.to_string(),
                found: bar.symbol.clone(),
                position,
            });
        }
    }

    for (position, pair) in bars.windows(2).enumerate() {
        let (prev, next) = (&pair[0], &pair[1]);
        if next.date == prev.date {
            return Err(QualityError::DuplicateDate {
                symbol: symbol.to_string(),
                date: next.date,
            });
        }
        if next.date < prev.date {
            return Err(QualityError::OutOfOrder {
                symbol: symbol.to_string(),
                date: next.date,
                previous: prev.date,
                position: position + 1,
            });
        }
    }

    Ok(())
}
