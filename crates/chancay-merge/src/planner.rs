//! Incremental merge planner.
//!
//! Partitions decoded bars against a symbol's stored date range. Bars
//! strictly older than the stored minimum become backfill, bars strictly
//! newer than the stored maximum become forward fill, and bars inside
//! the range are skipped without comparing their values: the store is
//! append-only in spirit and covered dates are never rewritten during
//! an incremental run.

use chancay_types::{Bar, ExistingRange, MergePlan};

/// Partitions decoded bars against the stored range for their symbol.
///
/// With no stored range (first-ever ingest) every bar goes forward.
/// Input order is preserved within each partition, so date-ordered
/// input yields date-ordered backfill and forward sets.
#[must_use]
pub fn plan(bars: Vec<Bar>, existing: Option<ExistingRange>) -> MergePlan {
    let Some(range) = existing else {
        return MergePlan {
            forward: bars,
            ..MergePlan::empty()
        };
    };

    let mut out = MergePlan::empty();
    for bar in bars {
        if bar.date < range.min_date {
            out.backfill.push(bar);
        } else if bar.date > range.max_date {
            out.forward.push(bar);
        } else {
            out.skipped += 1;
        }
    }
    out
}
