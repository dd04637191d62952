use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Source document not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Table extraction failed: {message}")]
    Extraction { message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),
}

pub type Result<T> = std::result::Result<T, ExtractError>;
