//! Bulk stock import: parse, plan, chunked commit.

use serde::Serialize;
use tracing::info;

use telarstock_import::{build_plan, parse, ImportMode};
use telarstock_ledger::StockItem;

use crate::store::{commit_chunked, LedgerStore, StoreError, Write};

use super::{ServiceError, ServiceResult};

/// What one import run did (or, on dry-run, would do).
#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    /// Distinct SKUs written (or planned, on dry-run).
    pub imported_count: usize,
    pub total_units: u64,
    pub per_type_summary: std::collections::BTreeMap<String, u64>,
    /// The planned items, returned only on dry-run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<Vec<StockItem>>,
    /// Garment tokens no alias mapped; written as-is but flagged for review.
    pub unmapped: Vec<String>,
    /// Input lines dropped, with reasons.
    pub skipped: Vec<String>,
}

pub struct ImportService<S> {
    store: S,
}

impl<S: LedgerStore> ImportService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Run one import. Dry-run parses and plans without touching the store.
    ///
    /// Commits are chunked; a mid-run failure leaves earlier chunks applied
    /// and surfaces as a partial-batch store error carrying the count that
    /// landed.
    pub fn import_stock(
        &self,
        raw: &str,
        mode: ImportMode,
        dry_run: bool,
    ) -> ServiceResult<ImportReport> {
        let table = parse(raw)?;
        let plan = build_plan(&table.rows, mode);

        let mut report = ImportReport {
            imported_count: plan.items.len(),
            total_units: plan.total_units,
            per_type_summary: plan.per_type.clone(),
            preview: None,
            unmapped: table.unmapped,
            skipped: table.skipped,
        };

        if dry_run {
            report.preview = Some(plan.items);
            info!(
                planned = report.imported_count,
                total_units = report.total_units,
                "import dry-run"
            );
            return Ok(report);
        }

        let writes: Vec<Write> = plan
            .items
            .into_iter()
            .map(|item| match mode {
                ImportMode::Overwrite => Write::SetStock { item },
                ImportMode::Accumulate => Write::MergeAddStock { item },
            })
            .collect();
        commit_chunked(&self.store, writes).map_err(|err| {
            if let StoreError::PartialBatch { committed, .. } = &err {
                info!(committed, "import aborted mid-run");
            }
            ServiceError::from(err)
        })?;

        info!(
            imported = report.imported_count,
            total_units = report.total_units,
            mode = ?mode,
            "import committed"
        );
        Ok(report)
    }
}
