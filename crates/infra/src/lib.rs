//! Infrastructure: the authoritative record store, the push feed, the
//! session cache and the application services that tie the domain crates to
//! them.

pub mod bus;
pub mod cache;
pub mod services;
pub mod store;


pub use bus::{StoreUpdate, Subscription, UpdateBus};
pub use cache::SessionCache;
pub use services::{
    CatalogService, HistoryService, ImportReport, ImportService, LedgerService, MovementReceipt,
    ServiceError, ServiceResult, UndoReceipt,
};
pub use store::{
    commit_chunked, LedgerStore, MemoryStore, StoreError, Version, Versioned, Write,
    IMPORT_CHUNK_SIZE, RECENT_LOG_WINDOW,
};
