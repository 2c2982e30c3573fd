//! Authoritative record store.
//!
//! Logical layout, backend-agnostic: a keyed table of stock items by SKU, a
//! timestamp-indexed append-only movement log, and a single catalog record.
//! Every record carries a monotonically increasing version; `commit` is the
//! serialization point — all guarded versions must still hold, and either
//! every write in the batch applies or none does.

mod batch;
mod memory;

pub use batch::{commit_chunked, IMPORT_CHUNK_SIZE};
pub use memory::MemoryStore;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;

use telarstock_catalog::MetadataCatalog;
use telarstock_core::{LogEntryId, Sku};
use telarstock_ledger::{MovementLogEntry, StockItem};

/// Bound of the locally cached movement-log window. Anything older must go
/// through an explicit range query.
pub const RECENT_LOG_WINDOW: usize = 600;

/// Record version. 0 means the record does not exist.
pub type Version = u64;

/// A record value paired with the version it was read at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Versioned<T> {
    pub value: T,
    pub version: Version,
}

/// Store operation error (infrastructure-level, as opposed to domain errors).
#[derive(Debug, Error)]
pub enum StoreError {
    /// An expected record version no longer holds; nothing was applied.
    /// Callers retry their read-modify-write loop on this.
    #[error("optimistic concurrency check failed: {0}")]
    Conflict(String),

    #[error("write failed: {0}")]
    Write(String),

    /// A chunked batch failed midway. Earlier chunks remain committed; the
    /// count reports how many writes landed before the failure.
    #[error("batch failed after {committed} writes: {source}")]
    PartialBatch {
        committed: usize,
        #[source]
        source: Box<StoreError>,
    },
}

/// One write inside an atomic multi-record commit.
#[derive(Debug, Clone)]
pub enum Write {
    /// Guarded upsert of a stock record.
    PutStock { item: StockItem, expected: Version },
    /// Guarded delete of a stock record.
    DeleteStock { sku: Sku, expected: Version },
    /// Unguarded set (bulk overwrite import; last writer wins).
    SetStock { item: StockItem },
    /// Additive upsert (bulk accumulate import): quantity adds onto whatever
    /// is stored, display fields take the incoming spelling.
    MergeAddStock { item: StockItem },
    /// Append a movement-log entry. The id must be fresh.
    AppendLog { entry: MovementLogEntry },
    /// Guarded removal of one log entry (undo).
    DeleteLog { id: LogEntryId, expected: Version },
    /// Guarded replacement of the single catalog record.
    PutCatalog {
        catalog: MetadataCatalog,
        expected: Version,
    },
}

/// The single authoritative store shared by every operator process.
///
/// Implementations must provide serializable per-record transactions: a
/// `commit` checks every guarded version against current state under one
/// lock/transaction and applies all writes or none. Multi-record commits are
/// supported, which is what lets a movement land its ledger write and its log
/// append together.
pub trait LedgerStore: Send + Sync {
    fn read_stock(&self, sku: &Sku) -> Result<Versioned<Option<StockItem>>, StoreError>;

    /// All stock records, ordered by SKU for deterministic listings.
    fn list_stock(&self) -> Result<Vec<StockItem>, StoreError>;

    /// Newest-first window over the movement log.
    fn recent_log(&self, limit: usize) -> Result<Vec<MovementLogEntry>, StoreError>;

    /// Full-range query (reports), oldest first, bounds inclusive.
    fn log_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<MovementLogEntry>, StoreError>;

    fn read_log_entry(
        &self,
        id: &LogEntryId,
    ) -> Result<Versioned<Option<MovementLogEntry>>, StoreError>;

    fn read_catalog(&self) -> Result<Versioned<Option<MetadataCatalog>>, StoreError>;

    /// Atomic multi-record commit. Fails with `Conflict` (applying nothing)
    /// if any guarded version is stale.
    fn commit(&self, writes: Vec<Write>) -> Result<(), StoreError>;
}

impl<S> LedgerStore for Arc<S>
where
    S: LedgerStore + ?Sized,
{
    fn read_stock(&self, sku: &Sku) -> Result<Versioned<Option<StockItem>>, StoreError> {
        (**self).read_stock(sku)
    }

    fn list_stock(&self) -> Result<Vec<StockItem>, StoreError> {
        (**self).list_stock()
    }

    fn recent_log(&self, limit: usize) -> Result<Vec<MovementLogEntry>, StoreError> {
        (**self).recent_log(limit)
    }

    fn log_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<MovementLogEntry>, StoreError> {
        (**self).log_range(start, end)
    }

    fn read_log_entry(
        &self,
        id: &LogEntryId,
    ) -> Result<Versioned<Option<MovementLogEntry>>, StoreError> {
        (**self).read_log_entry(id)
    }

    fn read_catalog(&self) -> Result<Versioned<Option<MetadataCatalog>>, StoreError> {
        (**self).read_catalog()
    }

    fn commit(&self, writes: Vec<Write>) -> Result<(), StoreError> {
        (**self).commit(writes)
    }
}
