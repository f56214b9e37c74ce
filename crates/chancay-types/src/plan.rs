//! Merge plan produced by the incremental merge planner.

use crate::Bar;

/// The outcome of reconciling decoded bars against a symbol's stored range.
///
/// `backfill` holds bars strictly older than the stored minimum date,
/// `forward` holds bars strictly newer than the stored maximum date, and
/// `skipped` counts bars already covered by the stored range. The three
/// partitions are disjoint and together account for every decoded bar.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergePlan {
    /// Bars older than anything currently stored, in date order.
    pub backfill: Vec<Bar>,
    /// Bars newer than the current stored maximum, in date order.
    pub forward: Vec<Bar>,
    /// Number of bars already covered by the stored range.
    pub skipped: usize,
}

impl MergePlan {
    /// Creates an empty plan (zero work).
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            backfill: Vec::new(),
            forward: Vec::new(),
            skipped: 0,
        }
    }

    /// Returns true if the plan contributes no writes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.backfill.is_empty() && self.forward.is_empty()
    }

    /// Total number of bars that will be written.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.backfill.len() + self.forward.len()
    }

    /// Number of backfilled (historical) bars in the plan.
    #[must_use]
    pub fn backfill_count(&self) -> usize {
        self.backfill.len()
    }

    /// Consumes the plan and returns the ordered write set:
    /// backfill bars first, then forward bars.
    #[must_use]
    pub fn into_write_set(self) -> Vec<Bar> {
        let mut bars = self.backfill;
        bars.extend(self.forward);
        bars
    }
}
