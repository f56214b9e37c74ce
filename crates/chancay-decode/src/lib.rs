//! Binary day-file record decoding for chancay.
//!
//! Day files store one 32-byte little-endian record per trading day:
//!
//! - [`RawDayRecord`] - Raw record before date and price normalization
//! - [`parse_records`] - Iterates complete records in a byte buffer
//! - [`decode_day_file`] - Decodes a whole buffer into validated bars

#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod parse;
mod record;

pub use parse::{decode_day_file, parse_records, record_count};
pub use record::RawDayRecord;
