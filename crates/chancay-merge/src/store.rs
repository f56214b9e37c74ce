//! Store collaborator interface.

use std::collections::HashSet;

use chancay_types::{Bar, QuarterId, StatementRow};
use chrono::NaiveDate;
use thiserror::Error;

/// Table name for daily bars.
pub const BARS_TABLE: &str = "stocks";

/// Errors surfaced by a store implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing storage engine reported a failure.
    #[error("Store backend error: {0}")]
    Backend(String),
}

/// The persistent time-series store the engine writes into.
///
/// Implementations live outside the core; the engine only relies on
/// this contract. `write_bars` must be an idempotent upsert keyed by
/// `(symbol, date)`, and `begin`/`commit`/`rollback` delimit an
/// explicit transaction scope. The store is single-writer: no other
/// process or thread writes the same symbol concurrently.
pub trait MarketStore {
    /// Returns the earliest stored date for a symbol, or `None` if the
    /// symbol has no history.
    fn get_min_date(&mut self, table: &str, symbol: &str)
    -> Result<Option<NaiveDate>, StoreError>;

    /// Returns the latest stored date for a symbol, or `None` if the
    /// symbol has no history.
    fn get_max_date(&mut self, table: &str, symbol: &str)
    -> Result<Option<NaiveDate>, StoreError>;

    /// Upserts the given date-ordered bars for a symbol.
    fn write_bars(&mut self, symbol: &str, bars: &[Bar]) -> Result<(), StoreError>;

    /// Upserts quarterly statement rows for a symbol.
    fn write_statements(&mut self, symbol: &str, rows: &[StatementRow])
    -> Result<(), StoreError>;

    /// Opens a transaction scope.
    fn begin(&mut self) -> Result<(), StoreError>;

    /// Commits the current transaction scope.
    fn commit(&mut self) -> Result<(), StoreError>;

    /// Rolls back the current transaction scope.
    fn rollback(&mut self) -> Result<(), StoreError>;

    /// Returns the set of quarters already marked completed.
    fn get_completed_quarters(&mut self) -> Result<HashSet<QuarterId>, StoreError>;

    /// Records a quarter as completed with its imported record count.
    fn mark_quarter_completed(
        &mut self,
        quarter: QuarterId,
        record_count: u64,
    ) -> Result<(), StoreError>;
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory store with staged transactions, used across this
    //! crate's tests.

    use std::collections::{BTreeMap, HashMap, HashSet};

    use chancay_types::{Bar, QuarterId, StatementRow};
    use chrono::NaiveDate;

    use super::{MarketStore, StoreError};

    /// Staged write held until commit.
    enum Staged {
        Bars(String, Vec<Bar>),
        QuarterMark(QuarterId, u64),
    }

    /// In-memory [`MarketStore`] with injectable failures.
    #[derive(Default)]
    pub(crate) struct MemoryStore {
        bars: HashMap<String, BTreeMap<NaiveDate, Bar>>,
        completed: HashSet<QuarterId>,
        staged: Vec<Staged>,
        in_transaction: bool,
        fail_writes: HashSet<String>,
        pub(crate) fail_next_commit: bool,
        pub(crate) transactions_committed: u64,
        pub(crate) transactions_rolled_back: u64,
    }

    impl MemoryStore {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        /// Makes `write_bars` fail for the given symbol.
        pub(crate) fn fail_writes_for(&mut self, symbol: &str) {
            self.fail_writes.insert(symbol.to_string());
        }

        pub(crate) fn bar_count(&self, symbol: &str) -> usize {
            self.bars.get(symbol).map_or(0, BTreeMap::len)
        }

        pub(crate) fn is_marked(&self, quarter: QuarterId) -> bool {
            self.completed.contains(&quarter)
        }

        pub(crate) fn seed_completed(&mut self, quarter: QuarterId) {
            self.completed.insert(quarter);
        }
    }

    impl MarketStore for MemoryStore {
        fn get_min_date(
            &mut self,
            _table: &str,
            symbol: &str,
        ) -> Result<Option<NaiveDate>, StoreError> {
            Ok(self
                .bars
                .get(symbol)
                .and_then(|m| m.keys().next().copied()))
        }

        fn get_max_date(
            &mut self,
            _table: &str,
            symbol: &str,
        ) -> Result<Option<NaiveDate>, StoreError> {
            Ok(self
                .bars
                .get(symbol)
                .and_then(|m| m.keys().next_back().copied()))
        }

        fn write_bars(&mut self, symbol: &str, bars: &[Bar]) -> Result<(), StoreError> {
            if self.fail_writes.contains(symbol) {
                return Err(StoreError::Backend(format!("injected failure: {symbol}")));
            }
            self.staged
                .push(Staged::Bars(symbol.to_string(), bars.to_vec()));
            Ok(())
        }

        fn write_statements(
            &mut self,
            symbol: &str,
            _rows: &[StatementRow],
        ) -> Result<(), StoreError> {
            if self.fail_writes.contains(symbol) {
                return Err(StoreError::Backend(format!("injected failure: {symbol}")));
            }
            Ok(())
        }

        fn begin(&mut self) -> Result<(), StoreError> {
            self.in_transaction = true;
            self.staged.clear();
            Ok(())
        }

        fn commit(&mut self) -> Result<(), StoreError> {
            if self.fail_next_commit {
                self.fail_next_commit = false;
                return Err(StoreError::Backend("injected commit failure".to_string()));
            }

            for staged in self.staged.drain(..) {
                match staged {
                    Staged::Bars(symbol, bars) => {
                        let per_symbol = self.bars.entry(symbol).or_default();
                        for bar in bars {
                            per_symbol.insert(bar.date, bar);
                        }
                    }
                    Staged::QuarterMark(quarter, _count) => {
                        self.completed.insert(quarter);
                    }
                }
            }
            self.in_transaction = false;
            self.transactions_committed += 1;
            Ok(())
        }

        fn rollback(&mut self) -> Result<(), StoreError> {
            self.staged.clear();
            self.in_transaction = false;
            self.transactions_rolled_back += 1;
            Ok(())
        }

        fn get_completed_quarters(&mut self) -> Result<HashSet<QuarterId>, StoreError> {
            Ok(self.completed.clone())
        }

        fn mark_quarter_completed(
            &mut self,
            quarter: QuarterId,
            record_count: u64,
        ) -> Result<(), StoreError> {
            if self.in_transaction {
                self.staged.push(Staged::QuarterMark(quarter, record_count));
            } else {
                self.completed.insert(quarter);
            }
            Ok(())
        }
    }
}
