//! End-to-end day-file import.
//!
//! Drives the full pipeline over one archive: enumerate day files,
//! classify names, decode records, run the quality gate, and hand
//! per-symbol bar sets to the batched applier. The run always finishes
//! and reports its stats; individual files fail soft.

use chancay_archive::DayArchive;
use chancay_decode::decode_day_file;
use chancay_instruments::{Classification, classify_day_file};
use chancay_quality::{QualityError, ValidationMode};
use chancay_types::{Bar, ImportStats};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::applier::{BatchApplier, DEFAULT_BATCH_SIZE};
use crate::cancel::CancelToken;
use crate::store::{MarketStore, StoreError};

/// Errors that abort an import run.
///
/// Per-file and per-batch problems are handled inside the run; only
/// archive enumeration failures, strict-mode quality failures, and
/// ledger-level store errors surface here.
#[derive(Error, Debug)]
pub enum ImportError {
    /// The archive could not be opened or enumerated.
    #[error("Archive error: {0}")]
    Archive(#[from] chancay_archive::ArchiveError),

    /// A store operation outside batch isolation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A hard quality violation in strict mode.
    #[error("Quality gate failed: {0}")]
    Quality(#[from] QualityError),
}

impl From<ImportError> for chancay_types::ChancayError {
    fn from(e: ImportError) -> Self {
        match e {
            ImportError::Archive(e) => Self::Archive(e.to_string()),
            ImportError::Store(e) => Self::Store(e.to_string()),
            ImportError::Quality(e) => Self::Quality(e.to_string()),
        }
    }
}

/// Imports day files from an archive into a store.
#[derive(Debug, Clone, Copy)]
pub struct DayImporter {
    applier: BatchApplier,
    batch_size: usize,
    validation: ValidationMode,
}

impl Default for DayImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl DayImporter {
    /// Creates an importer with default settings: incremental mode,
    /// lenient validation, batches of [`DEFAULT_BATCH_SIZE`] symbols.
    #[must_use]
    pub fn new() -> Self {
        Self {
            applier: BatchApplier::new(),
            batch_size: DEFAULT_BATCH_SIZE,
            validation: ValidationMode::default(),
        }
    }

    /// Sets the number of symbols applied per transaction.
    #[must_use]
    pub const fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Switches between full-import and incremental mode.
    #[must_use]
    pub const fn full_import(mut self, enabled: bool) -> Self {
        self.applier = self.applier.full_import(enabled);
        self
    }

    /// Sets the quality gate mode. Strict mode aborts the run on the
    /// first hard violation; lenient mode skips the offending file.
    #[must_use]
    pub const fn validation(mut self, mode: ValidationMode) -> Self {
        self.validation = mode;
        self
    }

    /// Runs the import over every day file in the archive.
    ///
    /// Cancellation is honored at batch boundaries: the batch in flight
    /// commits before the run stops, and the returned stats describe
    /// everything durably applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive cannot be enumerated, or, in
    /// strict validation mode, on the first hard quality violation.
    pub fn import<S: MarketStore>(
        &self,
        store: &mut S,
        archive: &mut DayArchive,
        cancel: &CancelToken,
    ) -> Result<ImportStats, ImportError> {
        let mut stats = ImportStats::new();
        let mut batch: Vec<(String, Vec<Bar>)> = Vec::with_capacity(self.batch_size);

        for entry in archive.files()? {
            let file = match entry {
                Ok(file) => file,
                Err(e) => {
                    warn!(error = %e, "unreadable archive entry, skipping");
                    stats.files_skipped += 1;
                    continue;
                }
            };

            let symbol = match classify_day_file(&file.name) {
                Classification::Equity(symbol) => symbol,
                Classification::NonEquity => {
                    debug!(file = %file.name, "non-equity instrument, skipped");
                    stats.files_skipped += 1;
                    continue;
                }
                Classification::Unrecognized => {
                    debug!(file = %file.name, "unrecognized filename, skipped");
                    stats.files_skipped += 1;
                    continue;
                }
            };

            let bars = decode_day_file(&symbol, &file.data);
            match chancay_quality::validate(&symbol, &bars, self.validation) {
                Ok(report) if report.passed() => batch.push((symbol, bars)),
                Ok(_) => {
                    // Lenient mode: the gate already logged the failure.
                    stats.files_skipped += 1;
                }
                Err(e) => return Err(e.into()),
            }

            if batch.len() >= self.batch_size {
                self.flush(store, &mut batch, &mut stats);
                if cancel.is_cancelled() {
                    info!(%stats, "cancellation requested, stopping at batch boundary");
                    return Ok(stats);
                }
            }
        }

        self.flush(store, &mut batch, &mut stats);
        info!(%stats, "day import finished");
        Ok(stats)
    }

    /// Applies the pending batch, absorbing batch-level failures.
    fn flush<S: MarketStore>(
        &self,
        store: &mut S,
        batch: &mut Vec<(String, Vec<Bar>)>,
        stats: &mut ImportStats,
    ) {
        if batch.is_empty() {
            return;
        }
        if let Err(e) = self
            .applier
            .apply_batch(store, std::mem::take(batch), stats)
        {
            warn!(error = %e, "batch failed and was rolled back, continuing");
        }
    }
}
