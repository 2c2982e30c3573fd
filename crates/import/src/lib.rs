//! Bulk/legacy stock import pipeline.
//!
//! Parses tabular exports (row-list or color×type matrix), reconciles
//! historical spellings through data-driven alias tables, and aggregates the
//! result into a write plan. Everything here is pure domain logic; committing
//! a plan in chunks is the infrastructure layer's job.

pub mod alias;
pub mod parse;
pub mod plan;

pub use alias::AliasTable;
pub use parse::{parse, ImportRow, ParsedTable, TableShape, AGGREGATED_SIZE};
pub use plan::{build_plan, ImportMode, ImportPlan};
