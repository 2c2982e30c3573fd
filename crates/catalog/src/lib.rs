//! Metadata catalog domain module.
//!
//! The mutable sets of recognized garment types, colors and sizes. Consumed
//! by movement forms and the import pipeline; deliberately *not* linked to
//! existing stock records (removing a catalog value leaves stock referencing
//! it untouched).

pub mod catalog;
pub mod defaults;

pub use catalog::MetadataCatalog;
