use serde::{Deserialize, Serialize};

use telarstock_core::{Color, DomainError, DomainResult};

/// The recognized garment types, colors and sizes.
///
/// Stored as a single record. Uniqueness is case-insensitive *within* each
/// list; no cross-kind uniqueness is enforced. Removal is an idempotent no-op
/// when the value is absent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MetadataCatalog {
    pub garments: Vec<String>,
    pub colors: Vec<Color>,
    pub sizes: Vec<String>,
}

impl MetadataCatalog {
    pub fn add_garment(&mut self, name: &str) -> DomainResult<()> {
        Self::add_name(&mut self.garments, name)
    }

    pub fn add_size(&mut self, name: &str) -> DomainResult<()> {
        Self::add_name(&mut self.sizes, name)
    }

    pub fn add_color(&mut self, color: Color) -> DomainResult<()> {
        let name = color.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("color name cannot be empty"));
        }
        if self.colors.iter().any(|c| c.name_matches(name)) {
            return Err(DomainError::duplicate(name));
        }
        self.colors.push(color);
        Ok(())
    }

    /// Returns whether anything was actually removed.
    pub fn remove_garment(&mut self, name: &str) -> bool {
        Self::remove_name(&mut self.garments, name)
    }

    pub fn remove_size(&mut self, name: &str) -> bool {
        Self::remove_name(&mut self.sizes, name)
    }

    pub fn remove_color(&mut self, name: &str) -> bool {
        let before = self.colors.len();
        self.colors.retain(|c| !c.name_matches(name));
        self.colors.len() != before
    }

    fn add_name(list: &mut Vec<String>, name: &str) -> DomainResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        let lowered = name.to_lowercase();
        if list.iter().any(|existing| existing.to_lowercase() == lowered) {
            return Err(DomainError::duplicate(name));
        }
        list.push(name.to_string());
        Ok(())
    }

    fn remove_name(list: &mut Vec<String>, name: &str) -> bool {
        let before = list.len();
        let target = name.trim().to_lowercase();
        list.retain(|existing| existing.to_lowercase() != target);
        list.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_color_is_rejected_case_insensitively() {
        let mut catalog = MetadataCatalog::default();
        catalog.add_color(Color::new("Turquesa")).unwrap();

        let err = catalog.add_color(Color::new("turquesa")).unwrap_err();
        assert!(matches!(err, DomainError::Duplicate(_)));
        assert_eq!(catalog.colors.len(), 1);
    }

    #[test]
    fn duplicate_garment_and_size_are_rejected() {
        let mut catalog = MetadataCatalog::default();
        catalog.add_garment("Polera").unwrap();
        catalog.add_size("XL").unwrap();

        assert!(catalog.add_garment("POLERA").is_err());
        assert!(catalog.add_size("xl").is_err());
    }

    #[test]
    fn remove_is_an_idempotent_no_op_when_absent() {
        let mut catalog = MetadataCatalog::default();
        catalog.add_garment("Casaca").unwrap();

        assert!(catalog.remove_garment("casaca"));
        assert!(!catalog.remove_garment("Casaca"));
        assert!(!catalog.remove_color("Fantasma"));
    }

    #[test]
    fn no_cross_kind_uniqueness() {
        let mut catalog = MetadataCatalog::default();
        catalog.add_garment("M").unwrap();
        catalog.add_size("M").unwrap();
        catalog.add_color(Color::new("M")).unwrap();
    }

    #[test]
    fn blank_names_fail_validation() {
        let mut catalog = MetadataCatalog::default();
        assert!(matches!(
            catalog.add_garment("  ").unwrap_err(),
            DomainError::Validation(_)
        ));
    }
}
