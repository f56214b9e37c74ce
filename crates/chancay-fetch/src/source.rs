//! Quarterly statement source abstraction.

use async_trait::async_trait;
use chancay_types::{QuarterId, StatementRow};

use crate::retry::FetchError;
use crate::session::Session;

/// Archives smaller than this are placeholders, not real quarter data.
pub const MIN_ARCHIVE_SIZE: u64 = 1000;

/// A quarter archive as listed by the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuarterArchive {
    /// Source-side archive name (e.g., `gpcw20231231.zip`).
    pub name: String,
    /// The reporting quarter the archive covers.
    pub quarter: QuarterId,
    /// Archive size in bytes, as reported by the listing.
    pub size: u64,
}

impl QuarterArchive {
    /// Returns true if the archive is large enough to hold real data.
    #[must_use]
    pub const fn is_plausible(&self) -> bool {
        self.size >= MIN_ARCHIVE_SIZE
    }
}

/// Statement rows fetched for one quarter.
///
/// Sources answer either a single-symbol query or a whole-quarter
/// query; the variant records which shape was returned so downstream
/// grouping does not have to guess.
#[derive(Debug, Clone, PartialEq)]
pub enum StatementSet {
    /// Rows for one requested symbol.
    Single {
        /// The requested instrument code.
        symbol: String,
        /// Its statement rows.
        rows: Vec<StatementRow>,
    },
    /// Rows for every symbol in the quarter.
    Multi {
        /// All statement rows, in source order.
        rows: Vec<StatementRow>,
    },
}

impl StatementSet {
    /// Total number of rows in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Single { rows, .. } | Self::Multi { rows } => rows.len(),
        }
    }

    /// Returns true if the set holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Groups the rows per symbol, preserving first-seen order.
    #[must_use]
    pub fn into_groups(self) -> Vec<(String, Vec<StatementRow>)> {
        let rows = match self {
            Self::Single { rows, .. } | Self::Multi { rows } => rows,
        };

        let mut groups: Vec<(String, Vec<StatementRow>)> = Vec::new();
        for row in rows {
            match groups.iter_mut().find(|(symbol, _)| *symbol == row.symbol) {
                Some((_, group)) => group.push(row),
                None => groups.push((row.symbol.clone(), vec![row])),
            }
        }
        groups
    }
}

/// A source of quarterly statement archives.
#[async_trait]
pub trait QuarterlySource {
    /// Opens a session with the source.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be reached.
    async fn connect(&self) -> Result<Session, FetchError>;

    /// Lists the quarter archives the source offers.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing fails.
    async fn list_quarters(&self, session: &Session)
    -> Result<Vec<QuarterArchive>, FetchError>;

    /// Fetches and decodes one quarter archive.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails or the payload is corrupt.
    async fn fetch_quarter(
        &self,
        session: &Session,
        archive: &QuarterArchive,
    ) -> Result<StatementSet, FetchError>;
}
