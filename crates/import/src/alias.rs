//! Alias normalization for legacy labels.
//!
//! Years of hand-typed exports left many spellings for the same garment type
//! ("Polera Crop", "Crop", "Cuellor", ...). The tables below map them onto a
//! small canonical set. The dictionary is data, not code: tests exercise it
//! directly and unknown tokens are surfaced for manual review rather than
//! silently passed through.

use std::collections::HashMap;

/// Result of normalizing one token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub canonical: String,
    /// False when no alias matched; the token passed through unchanged and
    /// should be flagged for review.
    pub mapped: bool,
}

/// Case-insensitive alias dictionary.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    canonical: HashMap<String, String>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut table = Self::new();
        for (alias, canonical) in pairs {
            table.insert(alias, canonical);
        }
        table
    }

    pub fn insert(&mut self, alias: &str, canonical: &str) {
        self.canonical
            .insert(alias.trim().to_lowercase(), canonical.to_string());
    }

    /// Normalize one token. Lookup is on the trimmed, lowercased form;
    /// unmatched tokens come back trimmed but otherwise unchanged.
    pub fn normalize(&self, token: &str) -> Normalized {
        let trimmed = token.trim();
        match self.canonical.get(&trimmed.to_lowercase()) {
            Some(canonical) => Normalized {
                canonical: canonical.clone(),
                mapped: true,
            },
            None => Normalized {
                canonical: trimmed.to_string(),
                mapped: false,
            },
        }
    }

    /// Historical garment-type spellings onto the canonical category set.
    ///
    /// Canonical names map to themselves so matrix headers that already use
    /// them count as recognized.
    pub fn garment_aliases() -> Self {
        Self::from_pairs([
            ("Poleras", "POLERAS"),
            ("Polera", "POLERAS"),
            ("Casacas", "CASACAS"),
            ("Casaca", "CASACAS"),
            ("Poleras C.R.", "POLERAS C.R."),
            ("Polera C.R.", "POLERAS C.R."),
            ("Polera C.R", "POLERAS C.R."),
            ("Polera CR", "POLERAS C.R."),
            ("C.R.", "POLERAS C.R."),
            ("C.R", "POLERAS C.R."),
            ("CR", "POLERAS C.R."),
            ("Cuello R", "POLERAS C.R."),
            ("Cuello-R", "POLERAS C.R."),
            ("Cuellor", "POLERAS C.R."),
            ("Poleras Crop", "POLERAS CROP"),
            ("Polera Crop", "POLERAS CROP"),
            ("Crop", "POLERAS CROP"),
            ("Poleras T.", "POLERAS T."),
            ("Polera T.", "POLERAS T."),
            ("Polera T", "POLERAS T."),
            ("Poleras T", "POLERAS T."),
            ("Polerast.", "POLERAS T."),
            ("Pijama Jersey", "PIJAMA JERSEY"),
            ("Pijama Jersy", "PIJAMA JERSEY"),
            ("PijamaJersey", "PIJAMA JERSEY"),
            ("Jersey", "PIJAMA JERSEY"),
            ("Pijama Felpa", "PIJAMA FELPA"),
            ("Felpa", "PIJAMA FELPA"),
            ("Pijamas Tem.", "PIJAMAS TEM."),
            ("Pijama Tem.", "PIJAMAS TEM."),
            ("Pijama Tem", "PIJAMAS TEM."),
            ("Pijama Item", "PIJAMAS TEM."),
            ("Tem.", "PIJAMAS TEM."),
            ("Bomber", "BOMBER"),
            ("Joggers", "JOGGERS"),
            ("Jogger", "JOGGERS"),
            ("Pan. Pijam", "PAN. PIJAM"),
            ("Pan Pijam", "PAN. PIJAM"),
            ("Pantalon Pijama", "PAN. PIJAM"),
            ("Polos", "POLOS"),
            ("Polo", "POLOS"),
        ])
    }

    /// Color names glued together by the spreadsheet export, plus a couple of
    /// renames, onto the catalog spellings.
    pub fn color_aliases() -> Self {
        Self::from_pairs([
            ("VerdeFosforecente", "Verde Fosforecente"),
            ("VerdePerico", "Verde Perico"),
            ("VerdeBotella", "Verde Botella"),
            ("VerdeMilitar", "Verde Militar"),
            ("AceroPal", "Acero Pal"),
            ("AzulMarino", "Azul Marino"),
            ("AzulCielo", "Azul Cielo"),
            ("BijouBlue", "Bijou Blue"),
            ("Mentabb", "Menta Bb"),
            ("Lilabb", "Lila Bb"),
            ("Rosadobb", "Rosado Bb"),
            ("PaloRosa", "Palo Rosa"),
            ("PaloRosaFuerte", "Palo Rosa Fuerte"),
            ("RosadoFuerte", "Rosado Fuerte"),
            ("FucsiaBrillante", "Fucsia Brillante"),
            ("Anaranjado", "Naranja"),
            ("AmarilloBrasil", "Amarillo Brazil"),
            ("AmarilloOro", "Amarillo Oro"),
            ("Melange3%", "Melange 3%"),
            ("Melange10%", "Melange 10%"),
            ("RataOscuro", "Rata Oscuro"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_family_maps_onto_the_canonical_set() {
        let table = AliasTable::garment_aliases();
        assert_eq!(table.normalize("Crop").canonical, "POLERAS CROP");
        assert_eq!(table.normalize("polera crop").canonical, "POLERAS CROP");
        assert_eq!(table.normalize("CUELLOR").canonical, "POLERAS C.R.");
        assert_eq!(table.normalize("cr").canonical, "POLERAS C.R.");
    }

    #[test]
    fn canonical_names_are_recognized_as_mapped() {
        let table = AliasTable::garment_aliases();
        let n = table.normalize("POLERAS C.R.");
        assert!(n.mapped);
        assert_eq!(n.canonical, "POLERAS C.R.");
    }

    #[test]
    fn unknown_tokens_pass_through_flagged() {
        let table = AliasTable::garment_aliases();
        let n = table.normalize("  Chompa Rara ");
        assert!(!n.mapped);
        assert_eq!(n.canonical, "Chompa Rara");
    }

    #[test]
    fn glued_color_spellings_are_split() {
        let table = AliasTable::color_aliases();
        assert_eq!(table.normalize("VerdeBotella").canonical, "Verde Botella");
        assert_eq!(table.normalize("anaranjado").canonical, "Naranja");
    }
}
