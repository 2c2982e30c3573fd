use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use telarstock_core::{Actor, DomainError, DomainResult, LogEntryId, Sku};

use crate::stock::Direction;

/// A requested stock mutation, as received from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementRequest {
    pub direction: Direction,
    pub garment: String,
    pub color: String,
    pub size: String,
    pub quantity: u32,
    pub actor: Actor,
}

impl MovementRequest {
    /// Reject malformed input before any transaction begins.
    pub fn validate(&self) -> DomainResult<()> {
        if self.quantity == 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        for (field, value) in [
            ("garment", &self.garment),
            ("color", &self.color),
            ("size", &self.size),
        ] {
            if value.trim().is_empty() {
                return Err(DomainError::validation(format!("{field} cannot be empty")));
            }
        }
        Ok(())
    }

    pub fn sku(&self) -> Sku {
        Sku::resolve(&self.garment, &self.color, &self.size)
    }
}

/// One line of the append-only movement log.
///
/// Removed only by an undo (single entry) or an admin range delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementLogEntry {
    pub id: LogEntryId,
    pub timestamp: DateTime<Utc>,
    pub actor: Actor,
    pub action: Direction,
    pub garment: String,
    pub color: String,
    pub size: String,
    pub quantity: u32,
    /// Human-readable summary, rendered once at write time.
    pub details: String,
}

impl MovementLogEntry {
    /// Record a validated movement request as a log line.
    pub fn record(request: &MovementRequest, at: DateTime<Utc>) -> Self {
        let details = format!(
            "{} - {} - Talla {} (Cant: {})",
            request.garment, request.color, request.size, request.quantity
        );
        Self {
            id: LogEntryId::new(),
            timestamp: at,
            actor: request.actor.clone(),
            action: request.direction,
            garment: request.garment.clone(),
            color: request.color.clone(),
            size: request.size.clone(),
            quantity: request.quantity,
            details,
        }
    }

    pub fn sku(&self) -> Sku {
        Sku::resolve(&self.garment, &self.color, &self.size)
    }

    /// The movement that exactly cancels this entry: reversing an entry is an
    /// exit of the same quantity, and vice versa.
    pub fn reversal(&self) -> (Direction, u32) {
        (self.action.reverse(), self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(direction: Direction, quantity: u32) -> MovementRequest {
        MovementRequest {
            direction,
            garment: "Polera".to_string(),
            color: "Negro".to_string(),
            size: "M".to_string(),
            quantity,
            actor: Actor::new("Jampier"),
        }
    }

    #[test]
    fn zero_quantity_is_rejected_before_any_transaction() {
        let err = request(Direction::Entry, 0).validate().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn blank_sku_fields_are_rejected() {
        let mut req = request(Direction::Entry, 5);
        req.color = "   ".to_string();
        assert!(matches!(
            req.validate().unwrap_err(),
            DomainError::Validation(_)
        ));
    }

    #[test]
    fn valid_request_passes() {
        request(Direction::Exit, 3).validate().unwrap();
    }

    #[test]
    fn recorded_entry_reverses_to_exit_of_same_quantity() {
        let entry = MovementLogEntry::record(&request(Direction::Entry, 10), Utc::now());
        assert_eq!(entry.reversal(), (Direction::Exit, 10));
        assert_eq!(entry.sku().as_str(), "polera_negro_m");
        assert_eq!(entry.details, "Polera - Negro - Talla M (Cant: 10)");
    }
}
