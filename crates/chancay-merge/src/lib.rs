//! Incremental merge engine for chancay.
//!
//! This crate turns decoded day files into durable store writes:
//!
//! - [`plan`] - partitions bars into backfill / forward / skipped
//! - [`BatchApplier`] - transactional batched apply with per-symbol
//!   failure isolation
//! - [`DayImporter`] - the full archive-to-store pipeline
//! - [`QuarterLedger`] - resumable quarterly statement bookkeeping
//! - [`MarketStore`] - the store contract implementations plug into

#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod applier;
mod cancel;
mod importer;
mod ledger;
mod planner;
mod store;

pub use applier::{BatchApplier, DEFAULT_BATCH_SIZE};
pub use cancel::CancelToken;
pub use importer::{DayImporter, ImportError};
pub use ledger::QuarterLedger;
pub use planner::plan;
pub use store::{BARS_TABLE, MarketStore, StoreError};
