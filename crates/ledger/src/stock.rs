use serde::{Deserialize, Serialize};

use telarstock_core::{DomainError, DomainResult, Sku};

/// Direction of a stock movement.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Entry,
    Exit,
}

impl Direction {
    /// The movement that cancels this one out.
    pub fn reverse(self) -> Self {
        match self {
            Direction::Entry => Direction::Exit,
            Direction::Exit => Direction::Entry,
        }
    }

    /// Operator-facing label, as the historical log rendered it.
    pub fn label(self) -> &'static str {
        match self {
            Direction::Entry => "Entrada",
            Direction::Exit => "Salida",
        }
    }
}

/// One stock record: the quantity currently held for a SKU.
///
/// Created on the first entry for a new SKU; mutated by every subsequent
/// movement; removed only by an explicit admin reset. Invariant: `quantity`
/// never goes negative — enforced at mutation time by [`apply_direction`],
/// never patched up after the fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockItem {
    pub sku: Sku,
    pub garment: String,
    pub color: String,
    pub size: String,
    pub quantity: u32,
}

/// Apply a movement to a current quantity.
///
/// The single place the non-negative invariant lives. An exit larger than
/// what is available is rejected with `InsufficientStock` and leaves the
/// quantity untouched.
pub fn apply_direction(current: u32, direction: Direction, quantity: u32) -> DomainResult<u32> {
    match direction {
        Direction::Entry => current
            .checked_add(quantity)
            .ok_or_else(|| DomainError::validation("quantity overflows stock counter")),
        Direction::Exit => {
            if quantity > current {
                Err(DomainError::InsufficientStock { available: current })
            } else {
                Ok(current - quantity)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn entry_increases_quantity() {
        assert_eq!(apply_direction(0, Direction::Entry, 10).unwrap(), 10);
        assert_eq!(apply_direction(7, Direction::Entry, 3).unwrap(), 10);
    }

    #[test]
    fn exit_decreases_quantity() {
        assert_eq!(apply_direction(10, Direction::Exit, 3).unwrap(), 7);
        assert_eq!(apply_direction(10, Direction::Exit, 10).unwrap(), 0);
    }

    #[test]
    fn overdrawn_exit_fails_with_available_quantity() {
        let err = apply_direction(7, Direction::Exit, 20).unwrap_err();
        assert_eq!(err, DomainError::InsufficientStock { available: 7 });
    }

    #[test]
    fn reverse_flips_direction() {
        assert_eq!(Direction::Entry.reverse(), Direction::Exit);
        assert_eq!(Direction::Exit.reverse(), Direction::Entry);
    }

    proptest! {
        /// For any movement sequence the running quantity equals
        /// Σ(entries) − Σ(accepted exits) and never goes negative; rejected
        /// movements leave the quantity unchanged.
        #[test]
        fn quantity_is_sum_of_accepted_movements(
            movements in proptest::collection::vec((any::<bool>(), 1u32..500), 0..64)
        ) {
            let mut quantity: u32 = 0;
            let mut entries: u64 = 0;
            let mut exits: u64 = 0;

            for (is_entry, qty) in movements {
                let direction = if is_entry { Direction::Entry } else { Direction::Exit };
                match apply_direction(quantity, direction, qty) {
                    Ok(next) => {
                        quantity = next;
                        match direction {
                            Direction::Entry => entries += u64::from(qty),
                            Direction::Exit => exits += u64::from(qty),
                        }
                    }
                    Err(DomainError::InsufficientStock { available }) => {
                        prop_assert_eq!(direction, Direction::Exit);
                        prop_assert_eq!(available, quantity);
                    }
                    Err(e) => return Err(TestCaseError::fail(format!("unexpected error: {e}"))),
                }
            }

            prop_assert_eq!(u64::from(quantity), entries - exits);
        }
    }
}
