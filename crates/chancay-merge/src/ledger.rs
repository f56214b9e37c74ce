//! Quarter completion ledger.
//!
//! Quarterly statement imports are resumable: each quarter that lands
//! at least one record is marked completed in the store, and later runs
//! consult the ledger to skip it. A quarter that yields zero records is
//! deliberately left unmarked so the next run retries it, since an
//! empty result usually means a transient source problem rather than a
//! genuinely empty quarter.

use std::collections::HashSet;

use chancay_types::QuarterId;
use tracing::{debug, info};

use crate::store::{MarketStore, StoreError};

/// The set of quarters already imported, loaded once per run.
#[derive(Debug, Clone)]
pub struct QuarterLedger {
    completed: HashSet<QuarterId>,
}

impl QuarterLedger {
    /// Loads the completed-quarter set from the store.
    ///
    /// # Errors
    ///
    /// Returns the store error if the ledger cannot be read.
    pub fn load<S: MarketStore>(store: &mut S) -> Result<Self, StoreError> {
        let completed = store.get_completed_quarters()?;
        debug!(completed = completed.len(), "quarter ledger loaded");
        Ok(Self { completed })
    }

    /// Returns true if the quarter has already been imported.
    #[must_use]
    pub fn is_completed(&self, quarter: QuarterId) -> bool {
        self.completed.contains(&quarter)
    }

    /// Number of quarters recorded as completed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.completed.len()
    }

    /// Returns true if no quarter has been completed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
    }

    /// Marks a quarter completed if it produced at least one record.
    ///
    /// Returns true if the quarter was marked. Zero-record quarters are
    /// left pending and will be retried by the next run.
    ///
    /// # Errors
    ///
    /// Returns the store error if the mark cannot be written.
    pub fn mark_if_nonzero<S: MarketStore>(
        &mut self,
        store: &mut S,
        quarter: QuarterId,
        record_count: u64,
    ) -> Result<bool, StoreError> {
        if record_count == 0 {
            info!(%quarter, "no records imported, leaving quarter pending");
            return Ok(false);
        }

        store.mark_quarter_completed(quarter, record_count)?;
        self.completed.insert(quarter);
        info!(%quarter, record_count, "quarter marked completed");
        Ok(true)
    }
}
