//! Resumable quarterly statement import.
//!
//! Quarters are fetched concurrently but applied sequentially, oldest
//! first, so that a cancelled or failed run leaves a clean prefix of
//! completed quarters behind. The completion ledger decides what is
//! pending; fetch and apply failures skip the quarter and leave it
//! pending for the next run.

use chancay_instruments::a_share_symbol;
use chancay_merge::{CancelToken, MarketStore, QuarterLedger, StoreError};
use chancay_types::{ImportStats, StatementRow};
use futures::stream::{self, StreamExt};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::retry::{FetchConfig, FetchError, backoff_delay};
use crate::session::Session;
use crate::source::{QuarterArchive, QuarterlySource, StatementSet};

/// Default number of symbols applied per statement transaction.
pub const STATEMENT_BATCH_SIZE: usize = 100;

/// Errors that abort a quarterly import run.
///
/// Per-quarter fetch and apply failures are handled inside the run;
/// only connection/listing failures and ledger-level store errors
/// surface here.
#[derive(Error, Debug)]
pub enum QuarterImportError {
    /// The source could not be reached or listed.
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// A store operation outside batch isolation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl From<QuarterImportError> for chancay_types::ChancayError {
    fn from(e: QuarterImportError) -> Self {
        match e {
            QuarterImportError::Fetch(e) => Self::Fetch(e.to_string()),
            QuarterImportError::Store(e) => Self::Store(e.to_string()),
        }
    }
}

/// Imports quarterly statement archives into a store.
#[derive(Debug, Clone)]
pub struct QuarterImporter {
    config: FetchConfig,
    batch_size: usize,
}

impl Default for QuarterImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl QuarterImporter {
    /// Creates an importer with default fetch settings and batches of
    /// [`STATEMENT_BATCH_SIZE`] symbols.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: FetchConfig::default(),
            batch_size: STATEMENT_BATCH_SIZE,
        }
    }

    /// Creates an importer with the given fetch configuration.
    #[must_use]
    pub fn with_config(config: FetchConfig) -> Self {
        Self {
            config,
            batch_size: STATEMENT_BATCH_SIZE,
        }
    }

    /// Sets the number of symbols applied per transaction.
    #[must_use]
    pub const fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Runs the import over every pending quarter the source offers.
    ///
    /// Cancellation is honored between quarters; everything already
    /// committed and marked stays.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be reached or listed, or
    /// if the completion ledger cannot be read or written.
    pub async fn import<S, Q>(
        &self,
        store: &mut S,
        source: &Q,
        cancel: &CancelToken,
    ) -> Result<ImportStats, QuarterImportError>
    where
        S: MarketStore,
        Q: QuarterlySource + Sync,
    {
        let mut stats = ImportStats::new();

        let session = self.connect_with_retries(source).await?;
        let mut ledger = QuarterLedger::load(store)?;

        let mut archives = source.list_quarters(&session).await?;
        archives.sort_by_key(|a| a.quarter);
        info!(listed = archives.len(), completed = ledger.len(), "quarters listed");

        let mut pending = Vec::new();
        for archive in archives {
            if ledger.is_completed(archive.quarter) {
                debug!(quarter = %archive.quarter, "already completed, skipped");
                stats.quarters_skipped += 1;
            } else if !archive.is_plausible() {
                warn!(
                    name = %archive.name,
                    size = archive.size,
                    "implausibly small archive, skipped"
                );
                stats.quarters_skipped += 1;
            } else {
                pending.push(archive);
            }
        }

        let fetched = stream::iter(pending)
            .map(|archive| {
                let session = session.clone();
                async move {
                    let result = self.fetch_with_retries(source, &session, &archive).await;
                    (archive, result)
                }
            })
            .buffered(self.config.concurrency);
        futures::pin_mut!(fetched);

        while let Some((archive, result)) = fetched.next().await {
            if cancel.is_cancelled() {
                info!(%stats, "cancellation requested, stopping between quarters");
                return Ok(stats);
            }

            let set = match result {
                Ok(set) => set,
                Err(e) => {
                    warn!(quarter = %archive.quarter, error = %e, "quarter fetch failed, skipped");
                    stats.quarters_skipped += 1;
                    continue;
                }
            };

            match self.apply_quarter(store, set, &mut stats) {
                Ok(count) => {
                    if ledger.mark_if_nonzero(store, archive.quarter, count)? {
                        stats.quarters_processed += 1;
                    } else {
                        stats.quarters_skipped += 1;
                    }
                }
                Err(e) => {
                    warn!(quarter = %archive.quarter, error = %e, "quarter apply failed, left pending");
                    stats.quarters_skipped += 1;
                }
            }
        }

        info!(%stats, "quarterly import finished");
        Ok(stats)
    }

    /// Opens a source session, retrying transient failures.
    async fn connect_with_retries<Q: QuarterlySource + Sync>(
        &self,
        source: &Q,
    ) -> Result<Session, FetchError> {
        let mut attempts = 0;
        loop {
            let result = match tokio::time::timeout(self.config.timeout, source.connect()).await {
                Ok(result) => result,
                Err(_) => Err(FetchError::Timeout(attempts + 1)),
            };
            match result {
                Ok(session) => return Ok(session),
                Err(e) if e.is_retryable() && attempts < self.config.max_retries => {
                    attempts += 1;
                    let delay = backoff_delay(&self.config, attempts);
                    warn!(attempt = attempts, error = %e, "connect failed, retrying");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Fetches one quarter, retrying transient failures.
    async fn fetch_with_retries<Q: QuarterlySource + Sync>(
        &self,
        source: &Q,
        session: &Session,
        archive: &QuarterArchive,
    ) -> Result<StatementSet, FetchError> {
        let mut attempts = 0;
        loop {
            let result =
                match tokio::time::timeout(self.config.timeout, source.fetch_quarter(session, archive))
                    .await
                {
                    Ok(result) => result,
                    Err(_) => Err(FetchError::Timeout(attempts + 1)),
                };
            match result {
                Ok(set) => return Ok(set),
                Err(e) if e.is_retryable() && attempts < self.config.max_retries => {
                    attempts += 1;
                    let delay = backoff_delay(&self.config, attempts);
                    warn!(
                        quarter = %archive.quarter,
                        attempt = attempts,
                        error = %e,
                        "quarter fetch failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Applies one quarter's rows in transactional batches.
    ///
    /// Rows for non-A-share codes are dropped; the rest are grouped per
    /// symbol, canonicalized, and written with per-symbol failure
    /// isolation. Returns the number of rows durably written.
    fn apply_quarter<S: MarketStore>(
        &self,
        store: &mut S,
        set: StatementSet,
        stats: &mut ImportStats,
    ) -> Result<u64, StoreError> {
        let mut groups: Vec<(String, Vec<StatementRow>)> = Vec::new();
        for (code, mut rows) in set.into_groups() {
            let Some(symbol) = a_share_symbol(&code) else {
                debug!(code = %code, "not an A-share, dropped");
                continue;
            };
            for row in &mut rows {
                row.symbol.clone_from(&symbol);
            }
            groups.push((symbol, rows));
        }

        let mut total: u64 = 0;
        for batch in groups.chunks(self.batch_size) {
            store.begin()?;

            let mut written: u64 = 0;
            for (symbol, rows) in batch {
                match store.write_statements(symbol, rows) {
                    Ok(()) => written += rows.len() as u64,
                    Err(e) => {
                        warn!(symbol = %symbol, error = %e, "statement write failed, skipping symbol");
                    }
                }
            }

            match store.commit() {
                Ok(()) => total += written,
                Err(e) => {
                    if let Err(rollback_err) = store.rollback() {
                        warn!(error = %rollback_err, "rollback failed after commit error");
                    }
                    stats.batches_rolled_back += 1;
                    stats.records_imported += total;
                    return Err(e);
                }
            }
        }

        stats.records_imported += total;
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chancay_types::{Bar, QuarterId};
    use chrono::NaiveDate;
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct MockStore {
        statements: HashMap<String, Vec<StatementRow>>,
        staged: Vec<(String, Vec<StatementRow>)>,
        completed: HashSet<QuarterId>,
    }

    impl MarketStore for MockStore {
        fn get_min_date(
            &mut self,
            _table: &str,
            _symbol: &str,
        ) -> Result<Option<NaiveDate>, StoreError> {
            Ok(None)
        }

        fn get_max_date(
            &mut self,
            _table: &str,
            _symbol: &str,
        ) -> Result<Option<NaiveDate>, StoreError> {
            Ok(None)
        }

        fn write_bars(&mut self, _symbol: &str, _bars: &[Bar]) -> Result<(), StoreError> {
            Ok(())
        }

        fn write_statements(
            &mut self,
            symbol: &str,
            rows: &[StatementRow],
        ) -> Result<(), StoreError> {
            self.staged.push((symbol.to_string(), rows.to_vec()));
            Ok(())
        }

        fn begin(&mut self) -> Result<(), StoreError> {
            self.staged.clear();
            Ok(())
        }

        fn commit(&mut self) -> Result<(), StoreError> {
            for (symbol, rows) in self.staged.drain(..) {
                self.statements.entry(symbol).or_default().extend(rows);
            }
            Ok(())
        }

        fn rollback(&mut self) -> Result<(), StoreError> {
            self.staged.clear();
            Ok(())
        }

        fn get_completed_quarters(&mut self) -> Result<HashSet<QuarterId>, StoreError> {
            Ok(self.completed.clone())
        }

        fn mark_quarter_completed(
            &mut self,
            quarter: QuarterId,
            _record_count: u64,
        ) -> Result<(), StoreError> {
            self.completed.insert(quarter);
            Ok(())
        }
    }

    struct MockSource {
        archives: Vec<QuarterArchive>,
        sets: Mutex<HashMap<QuarterId, Result<StatementSet, ()>>>,
        hanging: HashSet<QuarterId>,
        fetch_calls: AtomicUsize,
    }

    impl MockSource {
        fn new(archives: Vec<QuarterArchive>) -> Self {
            Self {
                archives,
                sets: Mutex::new(HashMap::new()),
                hanging: HashSet::new(),
                fetch_calls: AtomicUsize::new(0),
            }
        }

        fn with_set(self, quarter: QuarterId, set: StatementSet) -> Self {
            self.sets.lock().unwrap().insert(quarter, Ok(set));
            self
        }

        fn with_failure(self, quarter: QuarterId) -> Self {
            self.sets.lock().unwrap().insert(quarter, Err(()));
            self
        }

        fn with_hang(mut self, quarter: QuarterId) -> Self {
            self.hanging.insert(quarter);
            self
        }
    }

    #[async_trait::async_trait]
    impl QuarterlySource for MockSource {
        async fn connect(&self) -> Result<Session, FetchError> {
            Ok(Session::new(1))
        }

        async fn list_quarters(
            &self,
            _session: &Session,
        ) -> Result<Vec<QuarterArchive>, FetchError> {
            Ok(self.archives.clone())
        }

        async fn fetch_quarter(
            &self,
            _session: &Session,
            archive: &QuarterArchive,
        ) -> Result<StatementSet, FetchError> {
            self.fetch_calls.fetch_add(1, Ordering::SeqCst);
            if self.hanging.contains(&archive.quarter) {
                futures::future::pending::<()>().await;
            }
            match self.sets.lock().unwrap().get(&archive.quarter) {
                Some(Ok(set)) => Ok(set.clone()),
                Some(Err(())) => Err(FetchError::Corrupt("bad zip".into())),
                None => Ok(StatementSet::Multi { rows: Vec::new() }),
            }
        }
    }

    fn q(year: i32, quarter: u8) -> QuarterId {
        QuarterId::new(year, quarter).unwrap()
    }

    fn archive(quarter: QuarterId, size: u64) -> QuarterArchive {
        let month_day = match quarter.quarter {
            1 => "0331",
            2 => "0630",
            3 => "0930",
            _ => "1231",
        };
        QuarterArchive {
            name: format!("gpcw{}{month_day}.zip", quarter.year),
            quarter,
            size,
        }
    }

    fn row(code: &str) -> StatementRow {
        StatementRow {
            symbol: code.to_string(),
            period_end: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
            publ_date: None,
            values: vec![(chancay_types::StatementField::BasicEps, 1.0)],
        }
    }

    #[tokio::test]
    async fn test_pending_quarters_imported_and_marked() {
        let q3 = q(2023, 3);
        let q4 = q(2023, 4);
        let source = MockSource::new(vec![archive(q3, 5000), archive(q4, 5000)])
            .with_set(q3, StatementSet::Multi { rows: vec![row("600000")] })
            .with_set(q4, StatementSet::Multi { rows: vec![row("600000"), row("000001")] });

        let mut store = MockStore::default();
        store.completed.insert(q3);

        let stats = QuarterImporter::new()
            .import(&mut store, &source, &CancelToken::new())
            .await
            .unwrap();

        // Only the pending quarter is fetched.
        assert_eq!(source.fetch_calls.load(Ordering::SeqCst), 1);
        assert_eq!(stats.quarters_processed, 1);
        assert_eq!(stats.quarters_skipped, 1);
        assert_eq!(stats.records_imported, 2);
        assert!(store.completed.contains(&q4));
        assert_eq!(store.statements["600000.SS"].len(), 1);
        assert_eq!(store.statements["000001.SZ"].len(), 1);
    }

    #[tokio::test]
    async fn test_empty_quarter_left_pending() {
        let q4 = q(2023, 4);
        let source = MockSource::new(vec![archive(q4, 5000)])
            .with_set(q4, StatementSet::Multi { rows: Vec::new() });

        let mut store = MockStore::default();
        let stats = QuarterImporter::new()
            .import(&mut store, &source, &CancelToken::new())
            .await
            .unwrap();

        assert_eq!(stats.quarters_processed, 0);
        assert_eq!(stats.quarters_skipped, 1);
        assert!(!store.completed.contains(&q4));
    }

    #[tokio::test]
    async fn test_fetch_failure_skips_quarter_only() {
        let q3 = q(2023, 3);
        let q4 = q(2023, 4);
        let source = MockSource::new(vec![archive(q3, 5000), archive(q4, 5000)])
            .with_failure(q3)
            .with_set(q4, StatementSet::Multi { rows: vec![row("600000")] });

        let mut store = MockStore::default();
        let stats = QuarterImporter::new()
            .import(&mut store, &source, &CancelToken::new())
            .await
            .unwrap();

        assert_eq!(stats.quarters_processed, 1);
        assert_eq!(stats.quarters_skipped, 1);
        assert!(!store.completed.contains(&q3));
        assert!(store.completed.contains(&q4));
    }

    #[tokio::test]
    async fn test_hanging_fetch_times_out_and_skips_quarter() {
        let q3 = q(2023, 3);
        let q4 = q(2023, 4);
        let source = MockSource::new(vec![archive(q3, 5000), archive(q4, 5000)])
            .with_hang(q3)
            .with_set(q4, StatementSet::Multi { rows: vec![row("600000")] });

        let config = FetchConfig {
            timeout: std::time::Duration::from_millis(20),
            max_retries: 0,
            ..FetchConfig::default()
        };

        let mut store = MockStore::default();
        let stats = QuarterImporter::with_config(config)
            .import(&mut store, &source, &CancelToken::new())
            .await
            .unwrap();

        // The hung quarter is bounded by the timeout and left pending.
        assert_eq!(stats.quarters_skipped, 1);
        assert_eq!(stats.quarters_processed, 1);
        assert!(!store.completed.contains(&q3));
        assert!(store.completed.contains(&q4));
    }

    #[tokio::test]
    async fn test_small_archive_never_fetched() {
        let q4 = q(2023, 4);
        let source = MockSource::new(vec![archive(q4, 120)]);

        let mut store = MockStore::default();
        let stats = QuarterImporter::new()
            .import(&mut store, &source, &CancelToken::new())
            .await
            .unwrap();

        assert_eq!(source.fetch_calls.load(Ordering::SeqCst), 0);
        assert_eq!(stats.quarters_skipped, 1);
    }

    #[tokio::test]
    async fn test_non_a_share_rows_dropped() {
        let q4 = q(2023, 4);
        let source = MockSource::new(vec![archive(q4, 5000)]).with_set(
            q4,
            StatementSet::Multi {
                // BJ code and SZ index are not A-shares for this path.
                rows: vec![row("600000"), row("430017"), row("399001")],
            },
        );

        let mut store = MockStore::default();
        let stats = QuarterImporter::new()
            .import(&mut store, &source, &CancelToken::new())
            .await
            .unwrap();

        assert_eq!(stats.records_imported, 1);
        assert!(store.statements.contains_key("600000.SS"));
        assert!(!store.statements.keys().any(|k| k.contains("430017")));
    }
}
