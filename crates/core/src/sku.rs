//! Canonical SKU identity.

use serde::{Deserialize, Serialize};

/// Canonical identity of one garment type × color × size combination.
///
/// The id is *derived*, never assigned: equivalent inputs (modulo case and
/// whitespace/slash runs) always resolve to the same `Sku`. Collisions are
/// intentional — the SKU is the aggregation key for stock quantities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sku(String);

impl Sku {
    /// Derive the canonical id from the three SKU fields.
    ///
    /// Total function with no failure mode: trim each part, join with `_`,
    /// collapse every run of whitespace and `/` to a single `-`, lowercase.
    /// Slashes appear in two-tone color names ("Negro/Blanco") and must not
    /// survive into the id, which doubles as a storage key.
    pub fn resolve(garment: &str, color: &str, size: &str) -> Self {
        let joined = format!("{}_{}_{}", garment.trim(), color.trim(), size.trim());

        let mut id = String::with_capacity(joined.len());
        let mut in_run = false;
        for ch in joined.chars() {
            if ch.is_whitespace() || ch == '/' {
                if !in_run {
                    id.push('-');
                }
                in_run = true;
            } else {
                for lower in ch.to_lowercase() {
                    id.push(lower);
                }
                in_run = false;
            }
        }

        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Sku {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
