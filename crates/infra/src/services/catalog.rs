//! Catalog maintenance over the single shared catalog record.

use tracing::info;

use telarstock_catalog::MetadataCatalog;
use telarstock_core::{Color, DomainResult};

use crate::store::{LedgerStore, Write};

use super::{with_retries, ServiceResult};

pub struct CatalogService<S> {
    store: S,
}

impl<S: LedgerStore> CatalogService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Current catalog, seeding the factory defaults on first touch. A lost
    /// seeding race just means someone else seeded; re-read and use theirs.
    pub fn load_or_seed(&self) -> ServiceResult<MetadataCatalog> {
        let read = self.store.read_catalog()?;
        if let Some(catalog) = read.value {
            return Ok(catalog);
        }

        let seeded = MetadataCatalog::seeded();
        match self.store.commit(vec![Write::PutCatalog {
            catalog: seeded.clone(),
            expected: 0,
        }]) {
            Ok(()) => {
                info!("catalog seeded with factory defaults");
                Ok(seeded)
            }
            Err(crate::store::StoreError::Conflict(_)) => {
                let read = self.store.read_catalog()?;
                read.value.ok_or_else(|| {
                    crate::store::StoreError::Write("catalog vanished after seed race".to_string())
                        .into()
                })
            }
            Err(other) => Err(other.into()),
        }
    }

    pub fn add_garment(&self, name: &str) -> ServiceResult<()> {
        self.mutate("add_garment", |catalog| catalog.add_garment(name))
    }

    pub fn add_size(&self, name: &str) -> ServiceResult<()> {
        self.mutate("add_size", |catalog| catalog.add_size(name))
    }

    pub fn add_color(&self, color: Color) -> ServiceResult<()> {
        self.mutate("add_color", |catalog| catalog.add_color(color.clone()))
    }

    /// Removes are idempotent: a missing entry is success, not an error.
    pub fn remove_garment(&self, name: &str) -> ServiceResult<bool> {
        self.mutate_removal("remove_garment", |catalog| catalog.remove_garment(name))
    }

    pub fn remove_size(&self, name: &str) -> ServiceResult<bool> {
        self.mutate_removal("remove_size", |catalog| catalog.remove_size(name))
    }

    pub fn remove_color(&self, name: &str) -> ServiceResult<bool> {
        self.mutate_removal("remove_color", |catalog| catalog.remove_color(name))
    }

    fn mutate(
        &self,
        op: &'static str,
        apply: impl Fn(&mut MetadataCatalog) -> DomainResult<()>,
    ) -> ServiceResult<()> {
        with_retries(op, || {
            let read = self.store.read_catalog()?;
            let mut catalog = match read.value {
                Some(catalog) => catalog,
                None => MetadataCatalog::seeded(),
            };
            apply(&mut catalog)?;
            self.store.commit(vec![Write::PutCatalog {
                catalog,
                expected: read.version,
            }])?;
            info!(op, "catalog updated");
            Ok(())
        })
    }

    fn mutate_removal(
        &self,
        op: &'static str,
        apply: impl Fn(&mut MetadataCatalog) -> bool,
    ) -> ServiceResult<bool> {
        with_retries(op, || {
            let read = self.store.read_catalog()?;
            let mut catalog = match read.value {
                Some(catalog) => catalog,
                None => MetadataCatalog::seeded(),
            };
            let removed = apply(&mut catalog);
            if !removed {
                return Ok(false);
            }
            self.store.commit(vec![Write::PutCatalog {
                catalog,
                expected: read.version,
            }])?;
            info!(op, "catalog entry removed");
            Ok(true)
        })
    }
}
