use serde::Deserialize;

use telarstock_core::{Actor, Color};
use telarstock_import::ImportMode;
use telarstock_ledger::{Direction, MovementRequest};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct MovementBody {
    pub direction: Direction,
    pub garment: String,
    pub color: String,
    pub size: String,
    pub quantity: u32,
    pub actor: String,
}

impl MovementBody {
    pub fn into_request(self) -> MovementRequest {
        MovementRequest {
            direction: self.direction,
            garment: self.garment,
            color: self.color,
            size: self.size,
            quantity: self.quantity,
            actor: Actor::new(self.actor),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UndoBody {
    pub actor: String,
}

#[derive(Debug, Deserialize)]
pub struct ImportBody {
    pub raw: String,
    pub mode: ImportMode,
    #[serde(default)]
    pub dry_run: bool,
}

#[derive(Debug, Deserialize)]
pub struct NameBody {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ColorBody {
    pub name: String,
    pub hex: Option<String>,
}

impl ColorBody {
    pub fn into_color(self) -> Color {
        Color {
            name: self.name,
            hex: self.hex,
        }
    }
}

/// `?start=...&end=...` range, RFC 3339.
#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub start: String,
    pub end: String,
}
