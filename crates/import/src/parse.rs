//! Tabular input parsing and shape detection.

use telarstock_core::{DomainError, DomainResult};

use crate::alias::AliasTable;

/// Sentinel size used by matrix imports: that layout aggregates all sizes of
/// a type/color cell into one quantity.
pub const AGGREGATED_SIZE: &str = "VARIAS";

/// Structural layout of the pasted table.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TableShape {
    /// Explicit Type/Color/Size/Quantity columns, one row per SKU.
    RowList,
    /// Header row of garment types, one row per color, cell = quantity.
    Matrix,
}

/// One normalized input row, regardless of the source shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRow {
    pub garment: String,
    pub color: String,
    pub size: String,
    pub quantity: u32,
}

/// Parse result: rows plus everything the operator should review.
#[derive(Debug, Clone)]
pub struct ParsedTable {
    pub shape: TableShape,
    pub rows: Vec<ImportRow>,
    /// Lines dropped, with the reason.
    pub skipped: Vec<String>,
    /// Tokens no alias table recognized; passed through unchanged but flagged
    /// for manual review.
    pub unmapped: Vec<String>,
}

/// Detect the table shape structurally and parse it.
///
/// A line with recognizable Type/Color/Size/Quantity headers wins; otherwise
/// the first line carrying at least two non-numeric labels past its first
/// column is treated as a matrix header. Anything else is malformed input.
pub fn parse(raw: &str) -> DomainResult<ParsedTable> {
    let lines: Vec<&str> = raw.lines().collect();

    if let Some((idx, columns)) = find_row_list_header(&lines) {
        return Ok(parse_row_list(&lines, idx, &columns));
    }
    if let Some(idx) = find_matrix_header(&lines) {
        return parse_matrix(&lines, idx);
    }

    Err(DomainError::validation(
        "unrecognized table layout: expected Type/Color/Size/Quantity columns or a color × garment matrix",
    ))
}

fn split_cells(line: &str) -> Vec<String> {
    line.split(',')
        .map(|cell| cell.trim().trim_matches('"').trim().to_string())
        .collect()
}

struct RowListColumns {
    garment: usize,
    color: usize,
    size: usize,
    quantity: usize,
}

fn find_row_list_header(lines: &[&str]) -> Option<(usize, RowListColumns)> {
    for (idx, line) in lines.iter().enumerate() {
        let cells = split_cells(line);
        let position = |names: &[&str]| {
            cells
                .iter()
                .position(|cell| names.contains(&cell.to_lowercase().as_str()))
        };

        let (Some(garment), Some(color), Some(size), Some(quantity)) = (
            position(&["type", "tipo", "prenda"]),
            position(&["color"]),
            position(&["size", "talla"]),
            position(&["quantity", "cantidad"]),
        ) else {
            continue;
        };

        return Some((
            idx,
            RowListColumns {
                garment,
                color,
                size,
                quantity,
            },
        ));
    }
    None
}

fn find_matrix_header(lines: &[&str]) -> Option<usize> {
    lines.iter().position(|line| {
        let cells = split_cells(line);
        if cells.len() < 3 {
            return false;
        }
        let labels = cells
            .iter()
            .skip(1)
            .filter(|cell| !cell.is_empty() && cell.parse::<i64>().is_err())
            .count();
        labels >= 2
    })
}

/// Historical exports carry stray text and negative corrections in the
/// quantity column; both clamp to zero rather than poisoning the run.
/// Quantities past the counter range saturate instead of wrapping.
fn parse_quantity(cell: &str) -> u32 {
    cell.parse::<i64>()
        .ok()
        .filter(|q| *q > 0)
        .map(|q| u32::try_from(q).unwrap_or(u32::MAX))
        .unwrap_or(0)
}

fn flag_unmapped(unmapped: &mut Vec<String>, token: &str) {
    if !unmapped.iter().any(|t| t == token) {
        unmapped.push(token.to_string());
    }
}

fn parse_row_list(lines: &[&str], header_idx: usize, columns: &RowListColumns) -> ParsedTable {
    let garment_aliases = AliasTable::garment_aliases();
    let color_aliases = AliasTable::color_aliases();

    let mut rows = Vec::new();
    let mut skipped = Vec::new();
    let mut unmapped = Vec::new();

    for (offset, line) in lines.iter().enumerate().skip(header_idx + 1) {
        let cells = split_cells(line);
        if cells.iter().all(|cell| cell.is_empty()) {
            continue;
        }

        let field = |idx: usize| cells.get(idx).map(String::as_str).unwrap_or("");
        let garment_raw = field(columns.garment);
        let color_raw = field(columns.color);
        let size = field(columns.size);

        if garment_raw.is_empty() || color_raw.is_empty() || size.is_empty() {
            skipped.push(format!(
                "line {}: missing type/color/size fields",
                offset + 1
            ));
            continue;
        }

        let garment = garment_aliases.normalize(garment_raw);
        if !garment.mapped {
            flag_unmapped(&mut unmapped, &garment.canonical);
        }
        let color = color_aliases.normalize(color_raw);

        rows.push(ImportRow {
            garment: garment.canonical,
            color: color.canonical,
            size: size.to_string(),
            quantity: parse_quantity(field(columns.quantity)),
        });
    }

    ParsedTable {
        shape: TableShape::RowList,
        rows,
        skipped,
        unmapped,
    }
}

fn parse_matrix(lines: &[&str], header_idx: usize) -> DomainResult<ParsedTable> {
    let garment_aliases = AliasTable::garment_aliases();
    let color_aliases = AliasTable::color_aliases();

    let header = split_cells(lines[header_idx]);

    // The color label sits in the column just before the first garment
    // header; leading columns may be empty spreadsheet padding.
    let first_garment = header
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, cell)| !cell.is_empty() && !cell.eq_ignore_ascii_case("color"))
        .map(|(idx, _)| idx)
        .ok_or_else(|| DomainError::validation("matrix header has no garment columns"))?;
    let color_col = first_garment - 1;

    let mut unmapped = Vec::new();
    let mut garment_columns: Vec<(usize, String)> = Vec::new();
    for (idx, cell) in header.iter().enumerate().skip(first_garment) {
        if cell.is_empty() {
            continue;
        }
        if cell.to_uppercase().contains("TOTAL") {
            break;
        }
        let garment = garment_aliases.normalize(cell);
        if !garment.mapped {
            flag_unmapped(&mut unmapped, &garment.canonical);
        }
        garment_columns.push((idx, garment.canonical));
    }

    let mut rows = Vec::new();
    let mut skipped = Vec::new();

    for line in lines.iter().skip(header_idx + 1) {
        let cells = split_cells(line);
        let Some(color_raw) = cells.get(color_col).filter(|cell| !cell.is_empty()) else {
            continue;
        };
        if color_raw.to_uppercase().contains("TOTAL") {
            break;
        }

        let color = color_aliases.normalize(color_raw);
        let mut any = false;
        for (idx, garment) in &garment_columns {
            let quantity = cells.get(*idx).map(|cell| parse_quantity(cell)).unwrap_or(0);
            if quantity == 0 {
                continue;
            }
            any = true;
            rows.push(ImportRow {
                garment: garment.clone(),
                color: color.canonical.clone(),
                size: AGGREGATED_SIZE.to_string(),
                quantity,
            });
        }
        if !any {
            skipped.push(format!("color {}: no quantities", color.canonical));
        }
    }

    Ok(ParsedTable {
        shape: TableShape::Matrix,
        rows,
        skipped,
        unmapped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_list_is_detected_by_its_header() {
        let raw = "Tipo,Color,Talla,Cantidad\n\
                   Polera,Negro,M,10\n\
                   Casaca,Azul Marino,L,4\n";
        let parsed = parse(raw).unwrap();
        assert_eq!(parsed.shape, TableShape::RowList);
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(
            parsed.rows[0],
            ImportRow {
                garment: "POLERAS".to_string(),
                color: "Negro".to_string(),
                size: "M".to_string(),
                quantity: 10,
            }
        );
    }

    #[test]
    fn row_list_skips_incomplete_rows_and_reports_them() {
        let raw = "Type,Color,Size,Quantity\n\
                   Polera,,M,10\n\
                   Polera,Negro,M,5\n";
        let parsed = parse(raw).unwrap();
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.skipped.len(), 1);
        assert!(parsed.skipped[0].contains("line 2"));
    }

    #[test]
    fn row_list_clamps_bad_quantities_to_zero() {
        let raw = "Type,Color,Size,Quantity\n\
                   Polera,Negro,M,-3\n\
                   Polera,Negro,L,n/a\n";
        let parsed = parse(raw).unwrap();
        assert_eq!(parsed.rows[0].quantity, 0);
        assert_eq!(parsed.rows[1].quantity, 0);
    }

    #[test]
    fn oversized_quantities_saturate_instead_of_wrapping() {
        assert_eq!(parse_quantity("4294967301"), u32::MAX);
        assert_eq!(parse_quantity(&u32::MAX.to_string()), u32::MAX);
        assert_eq!(parse_quantity("-3"), 0);
        assert_eq!(parse_quantity("n/a"), 0);
    }

    #[test]
    fn row_list_normalizes_legacy_spellings_and_flags_unknowns() {
        let raw = "Prenda,Color,Talla,Cantidad\n\
                   Cuellor,VerdeBotella,M,3\n\
                   Chompa Rara,Negro,S,1\n";
        let parsed = parse(raw).unwrap();
        assert_eq!(parsed.rows[0].garment, "POLERAS C.R.");
        assert_eq!(parsed.rows[0].color, "Verde Botella");
        assert_eq!(parsed.rows[1].garment, "Chompa Rara");
        assert_eq!(parsed.unmapped, vec!["Chompa Rara".to_string()]);
    }

    #[test]
    fn matrix_shape_is_detected_without_a_row_list_header() {
        let raw = ",,POLERAS,CASACAS,TOTAL PREN.\n\
                   ,Negro,12,3,15\n\
                   ,Blanco,0,7,7\n\
                   ,TOTAL,12,10,22\n";
        let parsed = parse(raw).unwrap();
        assert_eq!(parsed.shape, TableShape::Matrix);
        // zero cells are dropped; TOTAL row terminates the table
        assert_eq!(parsed.rows.len(), 3);
        assert!(parsed
            .rows
            .iter()
            .all(|row| row.size == AGGREGATED_SIZE));
        assert_eq!(parsed.rows[0].garment, "POLERAS");
        assert_eq!(parsed.rows[0].color, "Negro");
        assert_eq!(parsed.rows[0].quantity, 12);
        assert_eq!(parsed.rows[2].garment, "CASACAS");
        assert_eq!(parsed.rows[2].color, "Blanco");
    }

    #[test]
    fn matrix_total_column_is_not_imported() {
        let raw = ",,POLERAS,TOTAL PREN.,CASACAS\n\
                   ,Negro,5,99,1\n";
        let parsed = parse(raw).unwrap();
        // columns after TOTAL are out of the table
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.rows[0].quantity, 5);
    }

    #[test]
    fn unrecognizable_input_is_a_validation_error() {
        let err = parse("just some text\nno structure here\n").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
