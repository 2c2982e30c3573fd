//! Process-wide service wiring.

use std::sync::Arc;

use telarstock_infra::{
    CatalogService, HistoryService, ImportService, LedgerService, MemoryStore, SessionCache,
    UpdateBus,
};

/// Everything the handlers need, built once at startup.
pub struct AppServices {
    pub bus: Arc<UpdateBus>,
    pub cache: Arc<SessionCache>,
    pub ledger: LedgerService<Arc<MemoryStore>>,
    pub history: HistoryService<Arc<MemoryStore>>,
    pub import: ImportService<Arc<MemoryStore>>,
    pub catalog: CatalogService<Arc<MemoryStore>>,
}

pub fn build_services() -> AppServices {
    let bus = Arc::new(UpdateBus::new());
    let store = Arc::new(MemoryStore::with_bus(bus.clone()));
    let cache = Arc::new(SessionCache::attach(&bus));

    let catalog = CatalogService::new(store.clone());
    // First boot seeds the factory catalog; a failure here is not fatal, the
    // next catalog touch retries.
    if let Err(e) = catalog.load_or_seed() {
        tracing::warn!(error = %e, "catalog seed failed at startup");
    }
    if let Err(e) = cache.refresh(&store) {
        tracing::warn!(error = %e, "initial cache refresh failed");
    }

    AppServices {
        bus,
        cache: cache.clone(),
        ledger: LedgerService::new(store.clone(), cache.clone()),
        history: HistoryService::new(store.clone(), cache),
        import: ImportService::new(store.clone()),
        catalog,
    }
}
