use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::types::Cell;

/// Keyword predicate evaluated against a lower-cased header label
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    /// Substring anywhere in the label
    Contains(&'static str),
    /// Label starts with the prefix
    StartsWith(&'static str),
    /// Whole token after splitting on non-alphanumerics
    Word(&'static str),
    All(&'static [Matcher]),
    Any(&'static [Matcher]),
    Not(&'static Matcher),
}

impl Matcher {
    pub fn matches(&self, label: &HeaderLabel) -> bool {
        match self {
            Matcher::Contains(s) => label.text.contains(s),
            Matcher::StartsWith(s) => label.text.starts_with(s),
            Matcher::Word(w) => label.words.iter().any(|t| t == w),
            Matcher::All(ms) => ms.iter().all(|m| m.matches(label)),
            Matcher::Any(ms) => ms.iter().any(|m| m.matches(label)),
            Matcher::Not(m) => !m.matches(label),
        }
    }
}

// Unit qualifiers shared by both schemas
pub const MILLIMETRE: Matcher = Matcher::Any(&[Matcher::Word("mm"), Matcher::Contains("millimet")]);
pub const NOT_MILLIMETRE: Matcher = Matcher::Not(&MILLIMETRE);
pub const KILOGRAM: Matcher = Matcher::Contains("kg");

/// A header cell prepared for matching
#[derive(Debug, Clone)]
pub struct HeaderLabel {
    text: String,
    words: Vec<String>,
}

impl HeaderLabel {
    pub fn new(raw: &str) -> Self {
        let text = raw.trim().to_lowercase();
        let words = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect();
        Self { text, words }
    }
}

/// One entry of a schema's ordered rule list
#[derive(Debug, Clone, Copy)]
pub struct HeaderRule<F> {
    pub field: F,
    pub matcher: Matcher,
}

impl<F> HeaderRule<F> {
    pub const fn new(field: F, matcher: Matcher) -> Self {
        Self { field, matcher }
    }
}

/// Canonical field → column index, built once per table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap<F: Eq + Hash> {
    columns: HashMap<F, usize>,
}

impl<F: Copy + Eq + Hash> ColumnMap<F> {
    pub fn empty() -> Self {
        Self {
            columns: HashMap::new(),
        }
    }

    /// Column index for a field; `None` when unresolved
    pub fn get(&self, field: F) -> Option<usize> {
        self.columns.get(&field).copied()
    }

    pub fn is_resolved(&self, field: F) -> bool {
        self.columns.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    fn claim(&mut self, field: F, index: usize) -> bool {
        if self.columns.contains_key(&field) {
            return false;
        }
        self.columns.insert(field, index);
        true
    }
}

/// Map header labels onto canonical fields.
///
/// Columns are scanned left to right. Each column is claimed by the first rule
/// that matches it; if that rule's field was already claimed by an earlier
/// column, the column is left unassigned.
pub fn resolve_columns<F>(header: &[Cell], rules: &[HeaderRule<F>]) -> ColumnMap<F>
where
    F: Copy + Eq + Hash + Debug,
{
    let mut map = ColumnMap::empty();

    for (idx, cell) in header.iter().enumerate() {
        let Some(raw) = cell.text() else {
            continue;
        };
        let label = HeaderLabel::new(&raw);

        if let Some(rule) = rules.iter().find(|r| r.matcher.matches(&label)) {
            if !map.claim(rule.field, idx) {
                tracing::trace!(
                    column = idx,
                    label = %raw,
                    field = ?rule.field,
                    "field already resolved, leaving column unassigned"
                );
            }
        }
    }

    map
}
