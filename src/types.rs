use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::DEFAULT_PAGES;
use crate::error::{ExtractError, Result};

/// A single cell as handed over by the table extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

impl Cell {
    /// Trimmed text of the cell, or `None` for blank markers
    pub fn text(&self) -> Option<String> {
        match self {
            Cell::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            Cell::Number(n) if n.is_finite() => Some(n.to_string()),
            Cell::Number(_) | Cell::Empty => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text().is_none()
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

/// Untrusted 2-D grid produced by the extraction collaborator.
///
/// Rows may have differing lengths; nothing about the content is typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    pub rows: Vec<Vec<Cell>>,
    /// Page the extractor reported, when it reports one
    pub page: Option<u32>,
}

impl RawTable {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows, page: None }
    }

    /// Convenience constructor for string grids
    pub fn from_strings<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<Cell>,
    {
        Self::new(
            rows.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        )
    }

    /// Number of columns, taken as the longest row
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|row| row.iter().all(Cell::is_blank))
    }

    /// Position of the first row holding at least one non-blank cell
    fn header_position(&self) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| row.iter().any(|cell| !cell.is_blank()))
    }

    /// The first non-empty row, conventionally the header
    pub fn header(&self) -> Option<&[Cell]> {
        self.header_position().map(|i| self.rows[i].as_slice())
    }

    /// Every non-empty row after the header
    pub fn data_rows(&self) -> impl Iterator<Item = &[Cell]> {
        let start = self.header_position().map(|i| i + 1).unwrap_or(self.rows.len());
        self.rows[start..]
            .iter()
            .filter(|row| row.iter().any(|cell| !cell.is_blank()))
            .map(Vec::as_slice)
    }
}

/// The dimension table families the pipeline understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    Flange,
    Pipe,
}

impl TableKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableKind::Flange => "flange",
            TableKind::Pipe => "pipe",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static PAGE_LIST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+(-\d+)?(,\d+(-\d+)?)*$").expect("page list pattern is valid")
});

/// Page selection passed through to the extractor: `all` or e.g. `50-150,160`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageRange {
    #[default]
    All,
    Pages(String),
}

impl PageRange {
    pub fn parse(raw: &str) -> Result<Self> {
        let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.eq_ignore_ascii_case(DEFAULT_PAGES) {
            return Ok(PageRange::All);
        }
        if !PAGE_LIST.is_match(&compact) {
            return Err(ExtractError::InvalidPageRange(raw.to_string()));
        }
        for part in compact.split(',') {
            if let Some((start, end)) = part.split_once('-') {
                let start: u32 = start
                    .parse()
                    .map_err(|_| ExtractError::InvalidPageRange(raw.to_string()))?;
                let end: u32 = end
                    .parse()
                    .map_err(|_| ExtractError::InvalidPageRange(raw.to_string()))?;
                if start == 0 || end < start {
                    return Err(ExtractError::InvalidPageRange(raw.to_string()));
                }
            } else if part.parse::<u32>().ok() == Some(0) {
                return Err(ExtractError::InvalidPageRange(raw.to_string()));
            }
        }
        Ok(PageRange::Pages(compact))
    }

    /// The form tabula accepts on its command line
    pub fn as_arg(&self) -> &str {
        match self {
            PageRange::All => DEFAULT_PAGES,
            PageRange::Pages(p) => p,
        }
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_arg())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_is_first_non_empty_row() {
        let table = RawTable::from_strings(vec![
            vec!["", " ", ""],
            vec!["NPS", "OD", "Wall"],
            vec!["", "", ""],
            vec!["2", "2.375", "0.154"],
        ]);

        let header = table.header().unwrap();
        assert_eq!(header[0].text().as_deref(), Some("NPS"));

        let data: Vec<_> = table.data_rows().collect();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0][1].text().as_deref(), Some("2.375"));
    }

    #[test]
    fn test_width_uses_longest_row() {
        let table = RawTable::from_strings(vec![vec!["a", "b"], vec!["1", "2", "3", "4", "5"]]);
        assert_eq!(table.width(), 5);
        assert_eq!(RawTable::default().width(), 0);
    }

    #[test]
    fn test_empty_table_has_no_header() {
        let table = RawTable::new(vec![vec![Cell::Empty, Cell::Number(f64::NAN)]]);
        assert!(table.is_empty());
        assert!(table.header().is_none());
        assert_eq!(table.data_rows().count(), 0);
    }

    #[test]
    fn test_number_cells_render_as_text() {
        assert_eq!(Cell::Number(2.0).text().as_deref(), Some("2"));
        assert_eq!(Cell::Number(4.5).text().as_deref(), Some("4.5"));
        assert_eq!(Cell::from("  6.00 ").text().as_deref(), Some("6.00"));
    }

    #[test]
    fn test_page_range_parsing() {
        assert_eq!(PageRange::parse("all").unwrap(), PageRange::All);
        assert_eq!(PageRange::parse("ALL").unwrap(), PageRange::All);
        assert_eq!(
            PageRange::parse("50-150, 160").unwrap(),
            PageRange::Pages("50-150,160".to_string())
        );
        assert!(PageRange::parse("abc").is_err());
        assert!(PageRange::parse("10-5").is_err());
        assert!(PageRange::parse("0").is_err());
        assert!(PageRange::parse("").is_err());
    }
}
