//! Stock ledger domain module.
//!
//! Business rules for stock movements, the movement log and undo, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod movement;
pub mod stock;
pub mod undo;

pub use movement::{MovementLogEntry, MovementRequest};
pub use stock::{apply_direction, Direction, StockItem};
pub use undo::UndoState;
