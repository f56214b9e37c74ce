//! Ingestion and incremental merge engine for Chinese market day files.
//!
//! This is a facade crate that re-exports functionality from the
//! chancay workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use chancay_lib::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut archive = DayArchive::open(std::path::Path::new("hsjday.zip"))?;
//!     let mut store = open_my_store()?; // any MarketStore implementation
//!
//!     let stats = DayImporter::new().import(&mut store, &mut archive, &CancelToken::new())?;
//!     println!("{stats}");
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use chancay_types::*;

// Re-export classification and canonical symbols
pub use chancay_instruments::{
    Classification, Market, a_share_symbol, canonical_symbol, classify_day_file, is_a_share_code,
    parse_day_filename,
};

// Re-export archive enumeration
pub use chancay_archive::{ArchiveError, DayArchive, DayFile};

// Re-export the day-file decoder
pub use chancay_decode::{RawDayRecord, decode_day_file, parse_records, record_count};

// Re-export the quality gate
pub use chancay_quality::{QualityError, QualityReport, ValidationMode, validate};

// Re-export the merge engine
pub use chancay_merge::{
    BARS_TABLE, BatchApplier, CancelToken, DEFAULT_BATCH_SIZE, DayImporter, ImportError,
    MarketStore, QuarterLedger, StoreError, plan,
};

// Re-export statement fetching
#[cfg(feature = "fetch")]
pub use chancay_fetch::fields;
#[cfg(feature = "fetch")]
pub use chancay_fetch::{
    FetchConfig, FetchError, QuarterArchive, QuarterImportError, QuarterImporter, QuarterlySource,
    Session, StatementSet,
};

/// Prelude module for convenient imports.
///
/// ```
/// use chancay_lib::prelude::*;
/// ```
pub mod prelude {
    pub use chancay_archive::DayArchive;
    pub use chancay_decode::decode_day_file;
    pub use chancay_instruments::{Classification, Market, classify_day_file};
    pub use chancay_merge::{BatchApplier, CancelToken, DayImporter, MarketStore, QuarterLedger};
    pub use chancay_quality::{ValidationMode, validate};
    pub use chancay_types::{
        Bar, ChancayError, ExistingRange, ImportStats, MergePlan, QuarterId, Result,
        StatementField, StatementRow,
    };

    #[cfg(feature = "fetch")]
    pub use chancay_fetch::{FetchConfig, QuarterImporter, QuarterlySource, StatementSet};
}
