//! Write-plan building: SKU aggregation and run summaries.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use telarstock_core::Sku;
use telarstock_ledger::StockItem;

use crate::parse::ImportRow;

/// How repeated SKUs within one run combine.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    /// Initial stock load: the last row for a SKU wins and the committed
    /// value replaces whatever is stored.
    Overwrite,
    /// Legacy history migration: repeated rows sum into one delta that is
    /// added onto existing stock.
    Accumulate,
}

/// Aggregated writes for one import run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportPlan {
    pub mode: ImportMode,
    /// One item per distinct SKU, in first-seen order.
    pub items: Vec<StockItem>,
    pub total_units: u64,
    pub per_type: BTreeMap<String, u64>,
}

/// Collapse parsed rows into one planned write per SKU.
pub fn build_plan(rows: &[ImportRow], mode: ImportMode) -> ImportPlan {
    let mut index: HashMap<Sku, usize> = HashMap::new();
    let mut items: Vec<StockItem> = Vec::new();

    for row in rows {
        let sku = Sku::resolve(&row.garment, &row.color, &row.size);
        match index.get(&sku) {
            Some(&at) => match mode {
                ImportMode::Overwrite => items[at].quantity = row.quantity,
                ImportMode::Accumulate => {
                    items[at].quantity = items[at].quantity.saturating_add(row.quantity)
                }
            },
            None => {
                index.insert(sku.clone(), items.len());
                items.push(StockItem {
                    sku,
                    garment: row.garment.clone(),
                    color: row.color.clone(),
                    size: row.size.clone(),
                    quantity: row.quantity,
                });
            }
        }
    }

    let total_units = items.iter().map(|item| u64::from(item.quantity)).sum();
    let mut per_type: BTreeMap<String, u64> = BTreeMap::new();
    for item in &items {
        *per_type.entry(item.garment.clone()).or_default() += u64::from(item.quantity);
    }

    ImportPlan {
        mode,
        items,
        total_units,
        per_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(garment: &str, color: &str, size: &str, quantity: u32) -> ImportRow {
        ImportRow {
            garment: garment.to_string(),
            color: color.to_string(),
            size: size.to_string(),
            quantity,
        }
    }

    #[test]
    fn accumulate_sums_repeated_skus() {
        let rows = vec![
            row("POLERAS", "Negro", "M", 5),
            row("POLERAS", "Negro", "M", 7),
        ];
        let plan = build_plan(&rows, ImportMode::Accumulate);
        assert_eq!(plan.items.len(), 1);
        assert_eq!(plan.items[0].quantity, 12);
        assert_eq!(plan.total_units, 12);
    }

    #[test]
    fn overwrite_keeps_the_last_row() {
        let rows = vec![
            row("POLERAS", "Negro", "M", 5),
            row("POLERAS", "Negro", "M", 7),
        ];
        let plan = build_plan(&rows, ImportMode::Overwrite);
        assert_eq!(plan.items.len(), 1);
        assert_eq!(plan.items[0].quantity, 7);
        assert_eq!(plan.total_units, 7);
    }

    #[test]
    fn case_variants_aggregate_into_one_sku() {
        let rows = vec![
            row("Poleras", "negro", "m", 1),
            row("POLERAS", "Negro", "M", 2),
        ];
        let plan = build_plan(&rows, ImportMode::Accumulate);
        assert_eq!(plan.items.len(), 1);
        assert_eq!(plan.items[0].quantity, 3);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_rows() -> impl Strategy<Value = Vec<ImportRow>> {
            proptest::collection::vec(
                (
                    prop_oneof![Just("POLERAS"), Just("CASACAS"), Just("PIJAMA JERSEY")],
                    prop_oneof![Just("Negro"), Just("Blanco"), Just("Azul Marino")],
                    prop_oneof![Just("S"), Just("M"), Just("L")],
                    0u32..1_000,
                )
                    .prop_map(|(garment, color, size, quantity)| ImportRow {
                        garment: garment.to_string(),
                        color: color.to_string(),
                        size: size.to_string(),
                        quantity,
                    }),
                0..40,
            )
        }

        proptest! {
            // Accumulation never loses or invents units.
            #[test]
            fn accumulate_total_equals_row_sum(rows in arb_rows()) {
                let plan = build_plan(&rows, ImportMode::Accumulate);
                let row_sum: u64 = rows.iter().map(|r| u64::from(r.quantity)).sum();
                prop_assert_eq!(plan.total_units, row_sum);
                prop_assert_eq!(
                    plan.per_type.values().copied().sum::<u64>(),
                    row_sum
                );
            }
        }
    }

    #[test]
    fn per_type_summary_groups_by_garment() {
        let rows = vec![
            row("POLERAS", "Negro", "M", 5),
            row("POLERAS", "Blanco", "L", 2),
            row("CASACAS", "Negro", "M", 4),
        ];
        let plan = build_plan(&rows, ImportMode::Overwrite);
        assert_eq!(plan.per_type.get("POLERAS"), Some(&7));
        assert_eq!(plan.per_type.get("CASACAS"), Some(&4));
        assert_eq!(plan.total_units, 11);
    }
}
