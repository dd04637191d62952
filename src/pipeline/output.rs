use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;
use tracing::info;

use crate::error::Result;

/// Write records as CSV with one column per serialized field. Parent
/// directories are created as needed.
pub fn write_csv<R: Serialize>(records: &[R], output_path: &Path) -> Result<usize> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file = fs::File::create(output_path)?;
    let written = write_records(records, file)?;
    info!(rows = written, output = %output_path.display(), "Saved CSV");
    Ok(written)
}

/// Serialize records to any writer; the header row comes from field names
pub fn write_records<R: Serialize, W: io::Write>(records: &[R], writer: W) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(records.len())
}
