use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use telarstock_catalog::MetadataCatalog;
use telarstock_core::{LogEntryId, Sku};
use telarstock_ledger::{MovementLogEntry, StockItem};

use crate::bus::{StoreUpdate, UpdateBus};

use super::{LedgerStore, StoreError, Version, Versioned, Write, RECENT_LOG_WINDOW};

/// A record slot. Deleted records leave a tombstone that keeps the version
/// counter, so a stale guard can never pass against a recreated record.
#[derive(Debug, Clone)]
struct Slot<T> {
    value: Option<T>,
    version: Version,
}

#[derive(Debug, Default)]
struct Inner {
    stock: HashMap<Sku, Slot<StockItem>>,
    log: HashMap<LogEntryId, Slot<MovementLogEntry>>,
    catalog: Option<Slot<MetadataCatalog>>,
}

/// In-memory implementation of the authoritative store.
///
/// Single-process stand-in for the shared backend: one `RwLock` write section
/// per commit gives the serializable per-record transaction the contract
/// requires. Publishes fresh snapshots on the update bus after every
/// successful commit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
    bus: Option<Arc<UpdateBus>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bus(bus: Arc<UpdateBus>) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            bus: Some(bus),
        }
    }

    fn poisoned() -> StoreError {
        StoreError::Write("lock poisoned".to_string())
    }

    fn list_stock_locked(inner: &Inner) -> Vec<StockItem> {
        let mut items: Vec<StockItem> = inner
            .stock
            .values()
            .filter_map(|slot| slot.value.clone())
            .collect();
        items.sort_by(|a, b| a.sku.cmp(&b.sku));
        items
    }

    fn recent_log_locked(inner: &Inner, limit: usize) -> Vec<MovementLogEntry> {
        let mut entries: Vec<MovementLogEntry> = inner
            .log
            .values()
            .filter_map(|slot| slot.value.clone())
            .collect();
        // Newest first; ids are time-ordered and break timestamp ties.
        entries.sort_by(|a, b| (b.timestamp, b.id).cmp(&(a.timestamp, a.id)));
        entries.truncate(limit);
        entries
    }

    fn stock_version(inner: &Inner, sku: &Sku) -> Version {
        inner.stock.get(sku).map(|slot| slot.version).unwrap_or(0)
    }

    fn log_version(inner: &Inner, id: &LogEntryId) -> Version {
        inner.log.get(id).map(|slot| slot.version).unwrap_or(0)
    }

    fn catalog_version(inner: &Inner) -> Version {
        inner.catalog.as_ref().map(|slot| slot.version).unwrap_or(0)
    }
}

/// Which record families a commit touched, for snapshot publication.
#[derive(Debug, Default, Clone, Copy)]
struct Touched {
    stock: bool,
    log: bool,
    catalog: bool,
}

impl LedgerStore for MemoryStore {
    fn read_stock(&self, sku: &Sku) -> Result<Versioned<Option<StockItem>>, StoreError> {
        let inner = self.inner.read().map_err(|_| Self::poisoned())?;
        let slot = inner.stock.get(sku);
        Ok(Versioned {
            value: slot.and_then(|s| s.value.clone()),
            version: slot.map(|s| s.version).unwrap_or(0),
        })
    }

    fn list_stock(&self) -> Result<Vec<StockItem>, StoreError> {
        let inner = self.inner.read().map_err(|_| Self::poisoned())?;
        Ok(Self::list_stock_locked(&inner))
    }

    fn recent_log(&self, limit: usize) -> Result<Vec<MovementLogEntry>, StoreError> {
        let inner = self.inner.read().map_err(|_| Self::poisoned())?;
        Ok(Self::recent_log_locked(&inner, limit))
    }

    fn log_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<MovementLogEntry>, StoreError> {
        let inner = self.inner.read().map_err(|_| Self::poisoned())?;
        let mut entries: Vec<MovementLogEntry> = inner
            .log
            .values()
            .filter_map(|slot| slot.value.clone())
            .filter(|entry| entry.timestamp >= start && entry.timestamp <= end)
            .collect();
        entries.sort_by(|a, b| (a.timestamp, a.id).cmp(&(b.timestamp, b.id)));
        Ok(entries)
    }

    fn read_log_entry(
        &self,
        id: &LogEntryId,
    ) -> Result<Versioned<Option<MovementLogEntry>>, StoreError> {
        let inner = self.inner.read().map_err(|_| Self::poisoned())?;
        let slot = inner.log.get(id);
        Ok(Versioned {
            value: slot.and_then(|s| s.value.clone()),
            version: slot.map(|s| s.version).unwrap_or(0),
        })
    }

    fn read_catalog(&self) -> Result<Versioned<Option<MetadataCatalog>>, StoreError> {
        let inner = self.inner.read().map_err(|_| Self::poisoned())?;
        Ok(Versioned {
            value: inner.catalog.as_ref().and_then(|s| s.value.clone()),
            version: Self::catalog_version(&inner),
        })
    }

    fn commit(&self, writes: Vec<Write>) -> Result<(), StoreError> {
        if writes.is_empty() {
            return Ok(());
        }

        let mut updates: Vec<StoreUpdate> = Vec::new();
        {
            let mut inner = self.inner.write().map_err(|_| Self::poisoned())?;

            // Phase 1: every guard must hold before anything is applied.
            for write in &writes {
                match write {
                    Write::PutStock { item, expected } => {
                        let current = Self::stock_version(&inner, &item.sku);
                        if current != *expected {
                            return Err(StoreError::Conflict(format!(
                                "stock {}: expected version {expected}, found {current}",
                                item.sku
                            )));
                        }
                    }
                    Write::DeleteStock { sku, expected } => {
                        let current = Self::stock_version(&inner, sku);
                        if current != *expected {
                            return Err(StoreError::Conflict(format!(
                                "stock {sku}: expected version {expected}, found {current}"
                            )));
                        }
                    }
                    Write::SetStock { .. } | Write::MergeAddStock { .. } => {}
                    Write::AppendLog { entry } => {
                        if inner
                            .log
                            .get(&entry.id)
                            .is_some_and(|slot| slot.value.is_some())
                        {
                            return Err(StoreError::Write(format!(
                                "log entry {} already exists",
                                entry.id
                            )));
                        }
                    }
                    Write::DeleteLog { id, expected } => {
                        let current = Self::log_version(&inner, id);
                        if current != *expected {
                            return Err(StoreError::Conflict(format!(
                                "log entry {id}: expected version {expected}, found {current}"
                            )));
                        }
                    }
                    Write::PutCatalog { expected, .. } => {
                        let current = Self::catalog_version(&inner);
                        if current != *expected {
                            return Err(StoreError::Conflict(format!(
                                "catalog: expected version {expected}, found {current}"
                            )));
                        }
                    }
                }
            }

            // Phase 2: apply.
            let mut touched = Touched::default();
            for write in writes {
                match write {
                    Write::PutStock { item, .. } | Write::SetStock { item } => {
                        let version = Self::stock_version(&inner, &item.sku) + 1;
                        inner.stock.insert(
                            item.sku.clone(),
                            Slot {
                                value: Some(item),
                                version,
                            },
                        );
                        touched.stock = true;
                    }
                    Write::MergeAddStock { mut item } => {
                        let version = Self::stock_version(&inner, &item.sku) + 1;
                        let existing = inner
                            .stock
                            .get(&item.sku)
                            .and_then(|slot| slot.value.as_ref())
                            .map(|stored| stored.quantity)
                            .unwrap_or(0);
                        item.quantity = existing.saturating_add(item.quantity);
                        inner.stock.insert(
                            item.sku.clone(),
                            Slot {
                                value: Some(item),
                                version,
                            },
                        );
                        touched.stock = true;
                    }
                    Write::DeleteStock { sku, .. } => {
                        let version = Self::stock_version(&inner, &sku) + 1;
                        inner.stock.insert(
                            sku,
                            Slot {
                                value: None,
                                version,
                            },
                        );
                        touched.stock = true;
                    }
                    Write::AppendLog { entry } => {
                        let version = Self::log_version(&inner, &entry.id) + 1;
                        inner.log.insert(
                            entry.id,
                            Slot {
                                value: Some(entry),
                                version,
                            },
                        );
                        touched.log = true;
                    }
                    Write::DeleteLog { id, .. } => {
                        let version = Self::log_version(&inner, &id) + 1;
                        inner.log.insert(
                            id,
                            Slot {
                                value: None,
                                version,
                            },
                        );
                        touched.log = true;
                    }
                    Write::PutCatalog { catalog, .. } => {
                        let version = Self::catalog_version(&inner) + 1;
                        inner.catalog = Some(Slot {
                            value: Some(catalog),
                            version,
                        });
                        touched.catalog = true;
                    }
                }
            }

            if self.bus.is_some() {
                if touched.stock {
                    updates.push(StoreUpdate::Inventory(Self::list_stock_locked(&inner)));
                }
                if touched.log {
                    updates.push(StoreUpdate::History(Self::recent_log_locked(
                        &inner,
                        RECENT_LOG_WINDOW,
                    )));
                }
                if touched.catalog {
                    if let Some(catalog) =
                        inner.catalog.as_ref().and_then(|slot| slot.value.clone())
                    {
                        updates.push(StoreUpdate::Catalog(catalog));
                    }
                }
            }
        }

        // Outside the write section: subscribers never block a commit.
        if let Some(bus) = &self.bus {
            for update in updates {
                bus.publish(update);
            }
        }

        Ok(())
    }
}
