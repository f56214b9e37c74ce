//! Core types for the chancay market data ingestion engine.
//!
//! This crate provides the fundamental data structures used throughout
//! chancay:
//!
//! - [`Bar`] - One trading day's OHLCV observation for a symbol
//! - [`ExistingRange`] - Per-symbol stored date range metadata
//! - [`MergePlan`] - Backfill / forward / skipped partition of decoded bars
//! - [`QuarterId`] / [`QuarterRecord`] - Quarter completion ledger entries
//! - [`ImportStats`] - Counters accumulated over an import run

#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod bar;
mod error;
mod plan;
mod quarter;
mod range;
mod statement;
mod stats;

pub use bar::Bar;
pub use error::{ChancayError, QuarterError, RangeError, Result};
pub use plan::MergePlan;
pub use quarter::{QuarterId, QuarterRecord};
pub use range::ExistingRange;
pub use statement::{StatementField, StatementRow};
pub use stats::ImportStats;
