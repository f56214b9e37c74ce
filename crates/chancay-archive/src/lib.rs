//! Day-file enumeration over ZIP containers and directory trees.
//!
//! Source archives carry day files under `{market}/lday/*.day` with
//! either separator style. This crate exposes them uniformly:
//!
//! - [`DayArchive`] - A ZIP container or extracted directory tree
//! - [`DayFile`] - One named day-file payload
//! - [`convention`] - The path convention matching rules

#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod convention;
mod source;

pub use source::{ArchiveError, DayArchive, DayFile, DayFileIter};
