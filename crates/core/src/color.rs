//! Color value type.

use serde::{Deserialize, Deserializer, Serialize};

/// A garment color: required display name plus optional hex swatch.
///
/// Legacy records carry colors as either a bare string or a `{name, hex}`
/// object. Both shapes deserialize into this one type, so every ingestion
/// boundary normalizes to the same representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Color {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hex: Option<String>,
}

impl Color {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hex: None,
        }
    }

    pub fn with_hex(name: impl Into<String>, hex: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hex: Some(hex.into()),
        }
    }

    /// Case-insensitive name match (the catalog uniqueness rule).
    pub fn name_matches(&self, other: &str) -> bool {
        self.name.to_lowercase() == other.trim().to_lowercase()
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Full {
                name: String,
                #[serde(default)]
                hex: Option<String>,
            },
            Bare(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Bare(name) => Color { name, hex: None },
            Raw::Full { name, hex } => Color { name, hex },
        })
    }
}
