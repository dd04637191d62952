// Pipeline processing: classification, header resolution, normalization, dedup

pub mod classify;
pub mod dedupe;
pub mod normalize;
pub mod resolve;
pub mod schema;

// Re-export key types and functions
pub use classify::is_dimension_table;
pub use dedupe::dedupe;
pub use normalize::{normalize_row, normalize_table, NormalizedTable};
pub use resolve::{resolve_columns, ColumnMap, HeaderRule, Matcher};
pub use schema::{DimensionRecord, DimensionSchema};
