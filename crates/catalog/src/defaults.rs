//! Seed data for a fresh catalog record.
//!
//! Written once when no catalog record exists yet. After seeding, the lists
//! are mutated only through add/remove operations.

use telarstock_core::Color;

use crate::catalog::MetadataCatalog;

pub const GARMENT_TYPES: &[&str] = &[
    "Polera",
    "Casaca",
    "Polo",
    "Jogger",
    "Crop",
    "Cuellor",
    "Pijama Jersey",
    "Polera Temática",
    "Bomber",
    "Pijama Felpa",
    "Pijama",
    "Pantalón P",
    "Cropcr",
];

pub const SIZES: &[&str] = &[
    "4", "6", "8", "10", "12", "14", "16", "S", "M", "L", "XL", "XXL",
];

/// Color names with their display hexes. Two-tone specials default to a
/// white swatch.
pub const COLORS: &[(&str, &str)] = &[
    ("Negro", "#000000"),
    ("Blanco", "#FFFFFF"),
    ("Melange 3%", "#E0E0E0"),
    ("Melange 10%", "#9E9E9E"),
    ("Rata Oscuro", "#424242"),
    ("Verde Fosforecente", "#39FF14"),
    ("Verde Perico", "#76FF03"),
    ("Verde Botella", "#1B5E20"),
    ("Verde Militar", "#556B2F"),
    ("Acero Pal", "#B0C4DE"),
    ("Azul Marino", "#0D47A1"),
    ("Azulino", "#2962FF"),
    ("Azul Cielo", "#4FC3F7"),
    ("Bijou Blue", "#4682B4"),
    ("Menta Bb", "#B9F6CA"),
    ("Celeste", "#81D4FA"),
    ("Morado", "#9C27B0"),
    ("Lila Bb", "#E1BEE7"),
    ("Rosado Bb", "#F8BBD0"),
    ("Palo Rosa", "#D8A1A1"),
    ("Palo Rosa Fuerte", "#C27474"),
    ("Rosado Fuerte", "#F06292"),
    ("Chicle", "#FF80AB"),
    ("Fucsia Brillante", "#D500F9"),
    ("Rojo", "#D32F2F"),
    ("Guinda", "#880E4F"),
    ("Naranja", "#FF9800"),
    ("Amarillo Brazil", "#FFEB3B"),
    ("Amarillo Oro", "#FFC107"),
    ("Mostaza", "#FBC02D"),
    ("Camello", "#C19A6B"),
    ("Kaki", "#F0E68C"),
    ("Beige", "#F5F5DC"),
    ("Perla", "#FAFAFA"),
    ("Panda", "#FFFFFF"),
    ("Negro/Blanco", "#FFFFFF"),
    ("Blanco/Negro", "#FFFFFF"),
    ("Negro/Rosado", "#FFFFFF"),
    ("Rosado/Negro", "#FFFFFF"),
    ("Rosado/Celeste", "#FFFFFF"),
    ("Celeste/Rosado", "#FFFFFF"),
    ("Grinch", "#FFFFFF"),
];

impl MetadataCatalog {
    /// A catalog populated with the default lists.
    pub fn seeded() -> Self {
        Self {
            garments: GARMENT_TYPES.iter().map(|g| g.to_string()).collect(),
            colors: COLORS
                .iter()
                .map(|(name, hex)| Color::with_hex(*name, *hex))
                .collect(),
            sizes: SIZES.iter().map(|s| s.to_string()).collect(),
        }
    }
}
