//! Movement-log queries and admin maintenance.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use telarstock_ledger::MovementLogEntry;

use crate::cache::SessionCache;
use crate::store::{commit_chunked, LedgerStore, Write};

use super::ServiceResult;

pub struct HistoryService<S> {
    store: S,
    cache: Arc<SessionCache>,
}

impl<S: LedgerStore> HistoryService<S> {
    pub fn new(store: S, cache: Arc<SessionCache>) -> Self {
        Self { store, cache }
    }

    /// The cached recent window, newest first.
    pub fn recent(&self) -> Vec<MovementLogEntry> {
        self.cache.sync_pending();
        self.cache.history()
    }

    /// Full-range report query against the store, oldest first.
    pub fn by_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ServiceResult<Vec<MovementLogEntry>> {
        Ok(self.store.log_range(start, end)?)
    }

    /// Delete every log entry in the range, chunked. Log entries never change
    /// after the append, so the guard version is always 1.
    pub fn delete_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> ServiceResult<usize> {
        let writes: Vec<Write> = self
            .store
            .log_range(start, end)?
            .into_iter()
            .map(|entry| Write::DeleteLog {
                id: entry.id,
                expected: 1,
            })
            .collect();
        let deleted = commit_chunked(&self.store, writes)?;
        info!(deleted, %start, %end, "log range deleted");
        Ok(deleted)
    }

    /// Append externally migrated log entries, chunked.
    pub fn import_log_entries(&self, entries: Vec<MovementLogEntry>) -> ServiceResult<usize> {
        let writes: Vec<Write> = entries
            .into_iter()
            .map(|entry| Write::AppendLog { entry })
            .collect();
        let imported = commit_chunked(&self.store, writes)?;
        info!(imported, "log entries imported");
        Ok(imported)
    }
}
