// Pipeline ingestion: turning a source document into raw tables

pub mod tabula;

use std::path::Path;

use crate::error::{ExtractError, Result};
use crate::types::{PageRange, RawTable};

pub use tabula::{ExtractionMethod, TabulaCli, TabulaConfig, TabulaJsonFile};

/// Port for the table-extraction collaborator.
///
/// Implementations may return an empty list, zero-row tables, or tables whose
/// rows differ in length; the pipeline tolerates all of these.
pub trait TableSource {
    fn extract(&self, path: &Path, pages: &PageRange) -> Result<Vec<RawTable>>;

    /// Short name used in logs
    fn name(&self) -> &str;
}

/// Fail fast when the source document does not exist
pub fn ensure_source_exists(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ExtractError::SourceNotFound(path.to_path_buf()))
    }
}

/// Pick an extractor for the path: exported tabula JSON is read directly,
/// anything else is run through the tabula CLI.
pub fn source_for_path(path: &Path, config: &TabulaConfig) -> Box<dyn TableSource> {
    let is_json = path
        .extension()
        .and_then(|s| s.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        Box::new(TabulaJsonFile)
    } else {
        Box::new(TabulaCli::new(config.clone()))
    }
}
