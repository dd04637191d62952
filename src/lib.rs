pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod pipeline;
pub mod types;

pub use config::Config;
pub use error::{ExtractError, Result};
pub use pipeline::ingestion::{source_for_path, TableSource};
pub use pipeline::output::write_csv;
pub use pipeline::processing::schema::{
    FlangeContext, FlangeRecord, FlangeSchema, PipeRecord, PipeSchema,
};
pub use pipeline::{extract_dimensions, run_batch, BatchOutcome};
pub use types::{Cell, PageRange, RawTable, TableKind};
