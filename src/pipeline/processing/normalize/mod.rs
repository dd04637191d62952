pub mod coerce;

use std::hash::Hash;

use super::resolve::ColumnMap;
use super::schema::DimensionSchema;
use crate::types::{Cell, RawTable};

/// Nominal pipe size as read from the anchor column
#[derive(Debug, Clone, PartialEq)]
pub struct Nps {
    /// Numeric size in inches; `None` for fractional designations like `1/8`
    pub inch: Option<f64>,
    /// The trimmed source text, kept for display
    pub display: String,
}

impl Nps {
    pub fn parse(raw: &str) -> Self {
        Self {
            inch: coerce::to_nps(raw),
            display: raw.trim().to_string(),
        }
    }
}

/// A data row seen through a table's column map
pub struct RowView<'a, F: Eq + Hash> {
    cells: &'a [Cell],
    map: &'a ColumnMap<F>,
}

impl<'a, F: Copy + Eq + Hash> RowView<'a, F> {
    pub fn new(cells: &'a [Cell], map: &'a ColumnMap<F>) -> Self {
        Self { cells, map }
    }

    /// Raw text at a field's column; `None` when unmapped, out of bounds or blank
    pub fn raw(&self, field: F) -> Option<String> {
        let idx = self.map.get(field)?;
        self.cells.get(idx)?.text()
    }

    pub fn float(&self, field: F) -> Option<f64> {
        coerce::to_float(self.raw(field).as_deref())
    }

    pub fn int(&self, field: F) -> Option<i64> {
        coerce::to_int(self.raw(field).as_deref())
    }

    pub fn text(&self, field: F) -> Option<String> {
        coerce::to_text(self.raw(field).as_deref())
    }
}

/// Normalize one data row. Returns `None` only when the NPS anchor is missing;
/// every other malformed cell degrades to a null field.
pub fn normalize_row<S: DimensionSchema>(
    schema: &S,
    row: &[Cell],
    map: &ColumnMap<S::Field>,
) -> Option<S::Record> {
    let view = RowView::new(row, map);
    let nps_raw = view.text(schema.anchor())?;
    Some(schema.build(&view, Nps::parse(&nps_raw)))
}

/// Outcome of normalizing every data row of one table
#[derive(Debug)]
pub struct NormalizedTable<R> {
    pub records: Vec<R>,
    pub rows_seen: usize,
    pub rows_dropped: usize,
}

pub fn normalize_table<S: DimensionSchema>(
    schema: &S,
    table: &RawTable,
    map: &ColumnMap<S::Field>,
) -> NormalizedTable<S::Record> {
    let mut records = Vec::new();
    let mut rows_seen = 0;

    for row in table.data_rows() {
        rows_seen += 1;
        if let Some(record) = normalize_row(schema, row, map) {
            records.push(record);
        }
    }

    NormalizedTable {
        rows_dropped: rows_seen - records.len(),
        records,
        rows_seen,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::processing::resolve::{resolve_columns, HeaderRule, Matcher};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Probe {
        Size,
        Value,
    }

    const RULES: &[HeaderRule<Probe>] = &[
        HeaderRule::new(Probe::Size, Matcher::Word("nps")),
        HeaderRule::new(Probe::Value, Matcher::Word("value")),
    ];

    #[test]
    fn test_row_view_handles_short_rows_and_unmapped_fields() {
        let header = vec![Cell::from("Other"), Cell::from("NPS"), Cell::from("Value")];
        let map = resolve_columns(&header, RULES);
        let short = vec![Cell::from("x"), Cell::from("4")];

        let view = RowView::new(&short, &map);
        assert_eq!(view.float(Probe::Size), Some(4.0));
        assert_eq!(view.float(Probe::Value), None);

        let empty_map = ColumnMap::<Probe>::empty();
        let view = RowView::new(&short, &empty_map);
        assert_eq!(view.raw(Probe::Size), None);
    }

    #[test]
    fn test_nps_keeps_display_text() {
        let nps = Nps::parse(" 1/8 ");
        assert_eq!(nps.inch, None);
        assert_eq!(nps.display, "1/8");

        let nps = Nps::parse("3\"");
        assert_eq!(nps.inch, Some(3.0));
        assert_eq!(nps.display, "3\"");
    }
}
