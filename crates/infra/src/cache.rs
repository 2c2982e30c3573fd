//! Per-session read cache.
//!
//! An operator session reads stock, history and catalog from this cache
//! instead of hitting the store on every screen refresh. The cache is primed
//! once from the store and then kept current by draining the push feed;
//! snapshots replace wholesale, so reads are always internally consistent.

use std::sync::{Mutex, RwLock};

use tracing::debug;

use telarstock_catalog::MetadataCatalog;
use telarstock_core::Sku;
use telarstock_ledger::{MovementLogEntry, StockItem};

use crate::bus::{StoreUpdate, Subscription, UpdateBus};
use crate::store::{LedgerStore, StoreError, RECENT_LOG_WINDOW};

pub struct SessionCache {
    // Mutex, not RwLock: the channel receiver is Send but not Sync, and only
    // one drain runs at a time anyway.
    subscription: Mutex<Subscription>,
    inventory: RwLock<Vec<StockItem>>,
    history: RwLock<Vec<MovementLogEntry>>,
    catalog: RwLock<Option<MetadataCatalog>>,
}

impl SessionCache {
    /// Subscribe to the push feed. The cache starts empty; call
    /// [`SessionCache::refresh`] to load current state.
    pub fn attach(bus: &UpdateBus) -> Self {
        Self {
            subscription: Mutex::new(bus.subscribe()),
            inventory: RwLock::new(Vec::new()),
            history: RwLock::new(Vec::new()),
            catalog: RwLock::new(None),
        }
    }

    /// Load current snapshots straight from the store.
    pub fn refresh<S: LedgerStore>(&self, store: &S) -> Result<(), StoreError> {
        let inventory = store.list_stock()?;
        let history = store.recent_log(RECENT_LOG_WINDOW)?;
        let catalog = store.read_catalog()?.value;

        self.apply(StoreUpdate::Inventory(inventory));
        self.apply(StoreUpdate::History(history));
        if let Some(catalog) = catalog {
            self.apply(StoreUpdate::Catalog(catalog));
        }
        debug!("session cache refreshed");
        Ok(())
    }

    /// Drop every cached snapshot. The next read sees empty state until a
    /// refresh or a pushed update fills it back in.
    pub fn invalidate(&self) {
        if let Ok(mut inventory) = self.inventory.write() {
            inventory.clear();
        }
        if let Ok(mut history) = self.history.write() {
            history.clear();
        }
        if let Ok(mut catalog) = self.catalog.write() {
            *catalog = None;
        }
    }

    /// Drain any pushed snapshots that arrived since the last call. Returns
    /// how many updates were applied.
    pub fn sync_pending(&self) -> usize {
        let mut applied = 0;
        if let Ok(subscription) = self.subscription.lock() {
            while let Some(update) = subscription.try_recv() {
                self.apply(update);
                applied += 1;
            }
        }
        applied
    }

    fn apply(&self, update: StoreUpdate) {
        match update {
            StoreUpdate::Inventory(items) => {
                if let Ok(mut inventory) = self.inventory.write() {
                    *inventory = items;
                }
            }
            StoreUpdate::History(entries) => {
                if let Ok(mut history) = self.history.write() {
                    *history = entries;
                }
            }
            StoreUpdate::Catalog(catalog) => {
                if let Ok(mut cached) = self.catalog.write() {
                    *cached = Some(catalog);
                }
            }
        }
    }

    pub fn inventory(&self) -> Vec<StockItem> {
        self.inventory.read().map(|i| i.clone()).unwrap_or_default()
    }

    pub fn stock_for(&self, sku: &Sku) -> Option<StockItem> {
        self.inventory
            .read()
            .ok()
            .and_then(|items| items.iter().find(|item| &item.sku == sku).cloned())
    }

    pub fn history(&self) -> Vec<MovementLogEntry> {
        self.history.read().map(|h| h.clone()).unwrap_or_default()
    }

    pub fn catalog(&self) -> Option<MetadataCatalog> {
        self.catalog.read().ok().and_then(|c| c.clone())
    }
}
