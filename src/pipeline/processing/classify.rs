//! Table classifier: decides from the header row alone whether a raw table is a
//! dimension table of the requested kind.

use crate::constants::MIN_TABLE_COLUMNS;
use crate::types::{RawTable, TableKind};

const NPS_TOKENS: &[&str] = &["nps", "nominal pipe size"];
const CLASS_TOKENS: &[&str] = &["class", "rating"];
const OD_TOKENS: &[&str] = &["outside", "o.d.", "od"];
const BOLT_CIRCLE_TOKENS: &[&str] = &["bolt circle", "bc"];
const WALL_TOKENS: &[&str] = &["wall"];

fn has_any(haystack: &str, tokens: &[&str]) -> bool {
    tokens.iter().any(|t| haystack.contains(t))
}

/// Lower-cased header cells joined with single spaces
fn header_text(table: &RawTable) -> Option<String> {
    let header = table.header()?;
    let joined = header
        .iter()
        .map(|cell| cell.text().unwrap_or_default().to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");
    Some(joined)
}

/// Keyword heuristic over the first non-empty row.
///
/// Flange tables need an NPS token plus any one of class/rating, outside
/// diameter or bolt circle. Pipe tables need NPS, outside diameter and wall.
/// Tables narrower than four columns are always rejected.
pub fn is_dimension_table(table: &RawTable, kind: TableKind) -> bool {
    if table.width() < MIN_TABLE_COLUMNS {
        return false;
    }
    let Some(text) = header_text(table) else {
        return false;
    };

    let has_nps = has_any(&text, NPS_TOKENS);
    let has_od = has_any(&text, OD_TOKENS);

    match kind {
        TableKind::Flange => {
            let has_class = has_any(&text, CLASS_TOKENS);
            let has_bc = has_any(&text, BOLT_CIRCLE_TOKENS);
            has_nps && (has_class || has_od || has_bc)
        }
        TableKind::Pipe => has_nps && has_od && has_any(&text, WALL_TOKENS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(header: &[&str]) -> RawTable {
        RawTable::from_strings(vec![header.to_vec(), vec!["2"; header.len()]])
    }

    #[test]
    fn test_narrow_tables_rejected() {
        let t = table(&["NPS", "Class", "OD"]);
        assert!(!is_dimension_table(&t, TableKind::Flange));
        assert!(!is_dimension_table(&t, TableKind::Pipe));
        assert!(!is_dimension_table(&RawTable::default(), TableKind::Flange));
    }

    #[test]
    fn test_flange_needs_one_secondary_signal() {
        assert!(is_dimension_table(&table(&["NPS", "Class", "A", "B"]), TableKind::Flange));
        assert!(is_dimension_table(&table(&["NPS", "X", "OD (in)", "B"]), TableKind::Flange));
        assert!(is_dimension_table(
            &table(&["Nominal Pipe Size", "X", "Y", "Bolt Circle"]),
            TableKind::Flange
        ));
        assert!(!is_dimension_table(&table(&["NPS", "X", "Y", "Z"]), TableKind::Flange));
        assert!(!is_dimension_table(&table(&["Size", "Class", "OD", "BC"]), TableKind::Flange));
    }

    #[test]
    fn test_pipe_requires_all_three() {
        assert!(is_dimension_table(
            &table(&["NPS", "DN", "Outside Diameter (in)", "Wall (in)"]),
            TableKind::Pipe
        ));
        assert!(!is_dimension_table(&table(&["NPS", "DN", "Outside Diameter", "Weight"]), TableKind::Pipe));
        assert!(!is_dimension_table(&table(&["NPS", "DN", "Wall", "Weight"]), TableKind::Pipe));
    }

    #[test]
    fn test_wide_table_of_blank_rows_rejected() {
        let t = RawTable::from_strings(vec![vec!["", " ", "", ""], vec!["", "", "", "", ""]]);
        assert_eq!(t.width(), 5);
        assert!(!is_dimension_table(&t, TableKind::Flange));
        assert!(!is_dimension_table(&t, TableKind::Pipe));
    }

    #[test]
    fn test_header_is_first_non_empty_row() {
        let t = RawTable::from_strings(vec![
            vec!["", "", "", ""],
            vec!["NPS", "Class", "OD", "BC"],
            vec!["2", "150", "6.00", "4.75"],
        ]);
        assert!(is_dimension_table(&t, TableKind::Flange));
    }
}
