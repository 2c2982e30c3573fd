//! Application services: the transactional use cases on top of the store.

mod catalog;
mod history;
mod import;
mod ledger;

pub use catalog::CatalogService;
pub use history::HistoryService;
pub use import::{ImportReport, ImportService};
pub use ledger::{LedgerService, MovementReceipt, UndoReceipt};

use thiserror::Error;
use tracing::warn;

use telarstock_core::DomainError;

use crate::store::StoreError;

/// How many times a read-modify-write loop retries on version conflict
/// before giving up.
pub const MAX_TXN_RETRIES: usize = 5;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Run `body` until it commits, re-reading on version conflicts. Conflicts
/// surviving all `MAX_TXN_RETRIES` attempts come back as a domain conflict;
/// any other outcome passes straight through.
pub(crate) fn with_retries<T>(
    op: &'static str,
    mut body: impl FnMut() -> ServiceResult<T>,
) -> ServiceResult<T> {
    for attempt in 1..=MAX_TXN_RETRIES {
        match body() {
            Err(ServiceError::Store(StoreError::Conflict(reason))) => {
                warn!(op, attempt, %reason, "commit conflicted, retrying");
            }
            other => return other,
        }
    }
    Err(ServiceError::Domain(DomainError::conflict(format!(
        "{op}: contention persisted after {MAX_TXN_RETRIES} attempts"
    ))))
}
