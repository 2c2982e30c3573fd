//! `telarstock-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod color;
pub mod error;
pub mod id;
pub mod sku;

pub use color::Color;
pub use error::{DomainError, DomainResult};
pub use id::{Actor, LogEntryId};
pub use sku::Sku;
