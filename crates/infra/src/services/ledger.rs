//! Stock movements, undo and the destructive reset.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use telarstock_core::{Actor, DomainError, LogEntryId, Sku};
use telarstock_ledger::{apply_direction, MovementLogEntry, MovementRequest, StockItem, UndoState};

use crate::cache::SessionCache;
use crate::store::{LedgerStore, StoreError, Write, RECENT_LOG_WINDOW};

use super::{with_retries, ServiceResult};

/// Outcome of a committed movement.
#[derive(Debug, Clone)]
pub struct MovementReceipt {
    pub sku: Sku,
    pub new_quantity: u32,
    pub logged: LogEntryId,
}

/// Outcome of a committed undo.
#[derive(Debug, Clone)]
pub struct UndoReceipt {
    pub message: String,
    pub sku: Sku,
    pub new_quantity: u32,
}

/// Movement use cases. Every mutation is one atomic commit that lands the
/// ledger write and its log line together; there is no window in which stock
/// changed but the log does not say so.
pub struct LedgerService<S> {
    store: S,
    cache: Arc<SessionCache>,
}

impl<S: LedgerStore> LedgerService<S> {
    pub fn new(store: S, cache: Arc<SessionCache>) -> Self {
        Self { store, cache }
    }

    /// Validate and commit one movement.
    ///
    /// CAS loop: read the stock record, apply the direction, commit the new
    /// quantity guarded by the read version together with the log append.
    /// Exits drawing more than available fail with the available quantity.
    pub fn apply_movement(&self, request: &MovementRequest) -> ServiceResult<MovementReceipt> {
        request.validate()?;
        let sku = request.sku();

        with_retries("apply_movement", || {
            let read = self.store.read_stock(&sku)?;
            let current = read.value.as_ref().map(|i| i.quantity).unwrap_or(0);
            let new_quantity = apply_direction(current, request.direction, request.quantity)?;

            let entry = MovementLogEntry::record(request, Utc::now());
            let logged = entry.id;
            let item = StockItem {
                sku: sku.clone(),
                garment: request.garment.clone(),
                color: request.color.clone(),
                size: request.size.clone(),
                quantity: new_quantity,
            };
            self.store.commit(vec![
                Write::PutStock {
                    item,
                    expected: read.version,
                },
                Write::AppendLog { entry },
            ])?;

            info!(
                sku = %sku,
                direction = ?request.direction,
                quantity = request.quantity,
                new_quantity,
                actor = %request.actor,
                "movement committed"
            );
            Ok(MovementReceipt {
                sku: sku.clone(),
                new_quantity,
                logged,
            })
        })
    }

    /// Reverse the actor's most recent logged movement.
    ///
    /// The stock reversal and the removal of the log line commit together, so
    /// a second immediate undo operates on the next-most-recent remaining
    /// entry. Undoing an entry movement can fail on insufficient stock.
    pub fn undo_last(&self, actor: &Actor) -> ServiceResult<UndoReceipt> {
        let mut state = UndoState::Idle;
        state = state.advance(UndoState::Requested).unwrap_or(state);
        state = state.advance(UndoState::Reversing).unwrap_or(state);

        let outcome = with_retries("undo_last", || {
            let entry = self
                .store
                .recent_log(RECENT_LOG_WINDOW)?
                .into_iter()
                .find(|entry| &entry.actor == actor)
                .ok_or(DomainError::NotFound)?;
            let entry_read = self.store.read_log_entry(&entry.id)?;
            if entry_read.value.is_none() {
                // Undone by a concurrent call between our two reads.
                return Err(StoreError::Conflict(format!(
                    "log entry {} vanished mid-undo",
                    entry.id
                ))
                .into());
            }

            let sku = entry.sku();
            let stock_read = self.store.read_stock(&sku)?;
            let current = stock_read.value.as_ref().map(|i| i.quantity).unwrap_or(0);
            let (direction, quantity) = entry.reversal();
            let new_quantity = apply_direction(current, direction, quantity)?;

            let item = StockItem {
                sku: sku.clone(),
                garment: entry.garment.clone(),
                color: entry.color.clone(),
                size: entry.size.clone(),
                quantity: new_quantity,
            };
            self.store.commit(vec![
                Write::PutStock {
                    item,
                    expected: stock_read.version,
                },
                Write::DeleteLog {
                    id: entry.id,
                    expected: entry_read.version,
                },
            ])?;

            info!(sku = %sku, actor = %actor, new_quantity, "movement undone");
            Ok(UndoReceipt {
                message: format!("Se deshizo: {}", entry.details),
                sku,
                new_quantity,
            })
        });

        let terminal = if outcome.is_ok() {
            UndoState::Done
        } else {
            UndoState::Failed
        };
        state = state.advance(terminal).unwrap_or(state);
        info!(actor = %actor, state = ?state, "undo lifecycle finished");

        outcome
    }

    /// Delete every stock record. Per-record commits, deliberately not atomic
    /// across SKUs; records that change mid-wipe are skipped. Returns the
    /// count actually removed.
    pub fn reset_all(&self) -> ServiceResult<usize> {
        let items = self.store.list_stock()?;
        let mut removed = 0usize;
        for item in items {
            let read = self.store.read_stock(&item.sku)?;
            if read.value.is_none() {
                continue;
            }
            match self.store.commit(vec![Write::DeleteStock {
                sku: item.sku.clone(),
                expected: read.version,
            }]) {
                Ok(()) => removed += 1,
                Err(StoreError::Conflict(reason)) => {
                    warn!(sku = %item.sku, %reason, "skipped during reset");
                }
                Err(other) => return Err(other.into()),
            }
        }
        info!(removed, "stock reset");
        Ok(removed)
    }

    /// Current stock listing from the session cache.
    pub fn snapshot(&self) -> Vec<StockItem> {
        self.cache.sync_pending();
        self.cache.inventory()
    }
}
