// Extraction pipeline: ingestion, processing, and output

pub mod ingestion;
pub mod output;
pub mod processing;

use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

use crate::constants::table_label;
use crate::error::Result;
use crate::metrics;
use crate::types::{PageRange, RawTable};
use ingestion::{ensure_source_exists, TableSource};
use processing::{
    dedupe, is_dimension_table, normalize_table, resolve_columns, DimensionRecord,
    DimensionSchema,
};

/// Result of one batch run over a document's tables
#[derive(Debug)]
pub struct BatchOutcome<R> {
    /// Deduplicated records in first-occurrence order
    pub records: Vec<R>,
    pub tables_seen: usize,
    pub tables_accepted: usize,
    pub rows_normalized: usize,
    pub rows_dropped: usize,
    pub duplicates_removed: usize,
}

impl<R> BatchOutcome<R> {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Run classification, header resolution and row normalization over every
/// table in order, then deduplicate the accumulated records once.
#[instrument(skip(schema, tables), fields(kind = %schema.kind(), tables = tables.len()))]
pub fn run_batch<S: DimensionSchema>(schema: &S, tables: &[RawTable]) -> BatchOutcome<S::Record> {
    let started = Instant::now();
    let kind = schema.kind();
    metrics::tables::seen(kind, tables.len());

    let mut accumulated = Vec::new();
    let mut tables_accepted = 0;
    let mut rows_dropped = 0;

    for (index, table) in tables.iter().enumerate() {
        let label = table_label(index);
        if !is_dimension_table(table, kind) {
            debug!(table = %label, width = table.width(), "Skipping table");
            metrics::tables::rejected(kind);
            continue;
        }
        tables_accepted += 1;
        metrics::tables::accepted(kind);

        let Some(header) = table.header() else {
            continue;
        };
        let map = resolve_columns(header, schema.rules());
        if !map.is_resolved(schema.anchor()) {
            debug!(table = %label, "No NPS column resolved; every row will be dropped");
        }

        let normalized = normalize_table(schema, table, &map);
        info!(
            table = %label,
            page = ?table.page,
            columns = map.len(),
            rows = normalized.records.len(),
            dropped = normalized.rows_dropped,
            "Processed table"
        );
        rows_dropped += normalized.rows_dropped;

        accumulated.extend(normalized.records.into_iter().map(|mut record| {
            record.set_provenance(label.clone());
            record
        }));
    }

    let rows_normalized = accumulated.len();
    let records = dedupe(accumulated);
    let duplicates_removed = rows_normalized - records.len();

    metrics::rows::normalized(kind, rows_normalized);
    metrics::rows::dropped(kind, rows_dropped);
    metrics::rows::duplicates_removed(kind, duplicates_removed);
    metrics::batch::duration(kind, started.elapsed().as_secs_f64());

    if tables_accepted == 0 {
        warn!("No {} dimension tables found", kind);
        metrics::batch::empty(kind);
    } else if records.is_empty() {
        warn!("Accepted {} tables but no rows had an NPS value", tables_accepted);
        metrics::batch::empty(kind);
    } else {
        info!(records = records.len(), duplicates_removed, "Batch complete");
    }

    BatchOutcome {
        records,
        tables_seen: tables.len(),
        tables_accepted,
        rows_normalized,
        rows_dropped,
        duplicates_removed,
    }
}

/// Extract tables from `path` with `source` and run the batch. A missing
/// source document is the only fatal condition raised here.
pub fn extract_dimensions<S: DimensionSchema>(
    source: &dyn TableSource,
    path: &Path,
    pages: &PageRange,
    schema: &S,
) -> Result<BatchOutcome<S::Record>> {
    ensure_source_exists(path)?;
    info!(source = source.name(), kind = %schema.kind(), "Extracting tables");
    let tables = source.extract(path, pages)?;
    Ok(run_batch(schema, &tables))
}
