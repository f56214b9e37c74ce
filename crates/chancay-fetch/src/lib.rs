//! Quarterly statement fetching and import for chancay.
//!
//! This crate provides the statement data pipeline:
//!
//! - [`QuarterlySource`] - async source of quarter archives
//! - [`Session`] - shared, reference-counted source session
//! - [`fields`] - source column layout for statement rows
//! - [`QuarterImporter`] - concurrent fetch, sequential batched apply
//! - [`FetchConfig`] - concurrency, timeout, and retry settings

#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod fields;
mod quarters;
mod retry;
mod session;
mod source;

pub use quarters::{QuarterImportError, QuarterImporter, STATEMENT_BATCH_SIZE};
pub use retry::{FetchConfig, FetchError, backoff_delay};
pub use session::{ReleaseFn, Session};
pub use source::{MIN_ARCHIVE_SIZE, QuarterArchive, QuarterlySource, StatementSet};
