//! Aggregate counters for an import run.

use serde::{Deserialize, Serialize};

/// Counters accumulated over a single import run.
///
/// Owned by the run and reset per invocation; the run always completes
/// and reports these regardless of per-symbol or per-quarter failures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportStats {
    /// Day files successfully decoded and applied.
    pub files_processed: u64,
    /// Day files skipped (non-equity, unrecognized, empty, or failed).
    pub files_skipped: u64,
    /// Records written to the store (bars or statement rows).
    pub records_imported: u64,
    /// Bars written before the previously stored minimum date.
    pub records_backfilled: u64,
    /// Symbols whose decoded bars were entirely covered by stored history.
    pub records_skipped: u64,
    /// Quarters fetched, applied, and marked completed.
    pub quarters_processed: u64,
    /// Quarters skipped: already completed, failed, or empty.
    pub quarters_skipped: u64,
    /// Batches rolled back at the commit boundary.
    pub batches_rolled_back: u64,
}

impl ImportStats {
    /// Creates a zeroed stats block.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets all counters to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Folds another stats block into this one.
    pub fn merge(&mut self, other: &Self) {
        self.files_processed += other.files_processed;
        self.files_skipped += other.files_skipped;
        self.records_imported += other.records_imported;
        self.records_backfilled += other.records_backfilled;
        self.records_skipped += other.records_skipped;
        self.quarters_processed += other.quarters_processed;
        self.quarters_skipped += other.quarters_skipped;
        self.batches_rolled_back += other.batches_rolled_back;
    }
}

impl std::fmt::Display for ImportStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "processed: {}, skipped: {}, imported: {} ({} backfilled), up-to-date: {}",
            self.files_processed,
            self.files_skipped,
            self.records_imported,
            self.records_backfilled,
            self.records_skipped
        )
    }
}
