use std::collections::HashSet;

use super::schema::DimensionRecord;

/// Float usable inside a natural key. Compares by bit pattern after folding
/// `-0.0` into `0.0`; coercion never yields NaN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FloatKey(u64);

impl FloatKey {
    pub fn new(value: f64) -> Self {
        let value = if value == 0.0 { 0.0 } else { value };
        FloatKey(value.to_bits())
    }

    pub fn from_option(value: Option<f64>) -> Option<Self> {
        value.map(Self::new)
    }
}

/// Keep the first record seen for each natural key, preserving input order
pub fn dedupe<R: DimensionRecord>(records: Vec<R>) -> Vec<R> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|record| seen.insert(record.natural_key()))
        .collect()
}
