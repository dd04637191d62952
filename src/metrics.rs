//! Batch metrics for the extraction pipeline
//!
//! Every function is a no-op until a recorder is installed. The CLI installs a
//! Prometheus recorder only when asked to write a metrics file.

use ::metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{info, warn};

use crate::error::Result;
use crate::types::TableKind;

static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder for in-process rendering. Idempotent.
pub fn init_metrics() {
    if HANDLE.get().is_some() {
        return;
    }
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            let _ = HANDLE.set(handle);
            info!("Prometheus recorder installed");
        }
        Err(e) => warn!("Failed to install Prometheus recorder: {}", e),
    }
}

/// Render the current metrics to a text file, if the recorder is installed
pub fn write_metrics(path: &Path) -> Result<bool> {
    let Some(handle) = HANDLE.get() else {
        return Ok(false);
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, handle.render())?;
    Ok(true)
}

pub mod tables {
    use super::*;

    pub fn seen(kind: TableKind, count: usize) {
        counter!("asme_tables_seen_total", "kind" => kind.as_str()).increment(count as u64);
    }

    pub fn accepted(kind: TableKind) {
        counter!("asme_tables_accepted_total", "kind" => kind.as_str()).increment(1);
    }

    pub fn rejected(kind: TableKind) {
        counter!("asme_tables_rejected_total", "kind" => kind.as_str()).increment(1);
    }
}

pub mod rows {
    use super::*;

    pub fn normalized(kind: TableKind, count: usize) {
        counter!("asme_rows_normalized_total", "kind" => kind.as_str()).increment(count as u64);
    }

    pub fn dropped(kind: TableKind, count: usize) {
        counter!("asme_rows_dropped_total", "kind" => kind.as_str()).increment(count as u64);
    }

    pub fn duplicates_removed(kind: TableKind, count: usize) {
        counter!("asme_rows_duplicates_removed_total", "kind" => kind.as_str())
            .increment(count as u64);
    }

    pub fn written(kind: TableKind, count: usize) {
        counter!("asme_rows_written_total", "kind" => kind.as_str()).increment(count as u64);
    }
}

pub mod batch {
    use super::*;

    pub fn duration(kind: TableKind, secs: f64) {
        histogram!("asme_batch_duration_seconds", "kind" => kind.as_str()).record(secs);
    }

    pub fn empty(kind: TableKind) {
        counter!("asme_batches_empty_total", "kind" => kind.as_str()).increment(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_without_recorder_is_noop() {
        tables::seen(TableKind::Pipe, 3);
        rows::dropped(TableKind::Flange, 1);
        batch::duration(TableKind::Pipe, 0.5);
    }

    #[test]
    fn test_write_metrics_reports_unwritable_path() {
        init_metrics();
        tables::accepted(TableKind::Flange);

        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().join("metrics.prom");
        assert!(write_metrics(&path).is_err());
    }
}
