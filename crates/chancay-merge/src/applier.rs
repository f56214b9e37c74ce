//! Batched transactional apply.
//!
//! Symbols are applied in batches inside an explicit store transaction.
//! A failure on one symbol skips that symbol and keeps the rest of the
//! batch; a failure at the commit boundary rolls the whole batch back
//! and discards its counter contributions, so reported stats only ever
//! describe durable writes.

use chancay_types::{Bar, ExistingRange, ImportStats};
use tracing::{debug, warn};

use crate::planner;
use crate::store::{BARS_TABLE, MarketStore, StoreError};

/// Default number of symbols applied per transaction.
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Applies decoded bar sets to a store in transactional batches.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchApplier {
    full_import: bool,
}

impl BatchApplier {
    /// Creates an applier in incremental mode.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Switches between full-import and incremental mode.
    ///
    /// In full-import mode the stored range is never consulted: every
    /// decoded bar is written, relying on the store's upsert semantics
    /// to repair any corrupted history in place.
    #[must_use]
    pub const fn full_import(mut self, enabled: bool) -> Self {
        self.full_import = enabled;
        self
    }

    /// Applies one batch of per-symbol bar sets inside a transaction.
    ///
    /// Per-symbol store errors are logged and counted as skipped files
    /// without aborting the batch. Counter contributions reach `stats`
    /// only after a successful commit.
    ///
    /// # Errors
    ///
    /// Returns the store error if the transaction cannot be opened or
    /// committed. On commit failure the batch is rolled back first and
    /// every symbol in it is counted as skipped.
    pub fn apply_batch<S: MarketStore>(
        &self,
        store: &mut S,
        batch: Vec<(String, Vec<Bar>)>,
        stats: &mut ImportStats,
    ) -> Result<(), StoreError> {
        if batch.is_empty() {
            return Ok(());
        }
        let batch_len = batch.len() as u64;

        store.begin()?;

        let mut pending = ImportStats::new();
        for (symbol, bars) in batch {
            match self.apply_symbol(store, &symbol, bars, &mut pending) {
                Ok(()) => pending.files_processed += 1,
                Err(e) => {
                    warn!(symbol = %symbol, error = %e, "symbol apply failed, skipping");
                    pending.files_skipped += 1;
                }
            }
        }

        match store.commit() {
            Ok(()) => {
                stats.merge(&pending);
                Ok(())
            }
            Err(e) => {
                if let Err(rollback_err) = store.rollback() {
                    warn!(error = %rollback_err, "rollback failed after commit error");
                }
                stats.batches_rolled_back += 1;
                stats.files_skipped += batch_len;
                Err(e)
            }
        }
    }

    /// Plans and writes one symbol's bars, updating the pending counters.
    fn apply_symbol<S: MarketStore>(
        &self,
        store: &mut S,
        symbol: &str,
        bars: Vec<Bar>,
        pending: &mut ImportStats,
    ) -> Result<(), StoreError> {
        let existing = if self.full_import {
            None
        } else {
            let min = store.get_min_date(BARS_TABLE, symbol)?;
            let max = store.get_max_date(BARS_TABLE, symbol)?;
            ExistingRange::from_endpoints(min, max)
                .map_err(|e| StoreError::Backend(e.to_string()))?
        };

        let plan = planner::plan(bars, existing);
        if plan.is_empty() {
            debug!(symbol, skipped = plan.skipped, "already up to date");
            pending.records_skipped += 1;
            return Ok(());
        }

        let backfilled = plan.backfill_count() as u64;
        let write_set = plan.into_write_set();
        store.write_bars(symbol, &write_set)?;

        // Counters move only once the write has been accepted.
        pending.records_backfilled += backfilled;
        pending.records_imported += write_set.len() as u64;
        debug!(symbol, written = write_set.len(), "bars written");
        Ok(())
    }
}
