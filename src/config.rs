use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::{
    DEFAULT_CATEGORY, DEFAULT_CONFIG_FILE, FLANGE_SOURCE_FILE_NAME, FLANGE_STANDARD_NAME,
    PIPE_SOURCE_FILE_NAME, PIPE_STANDARD_NAME,
};
use crate::error::{ExtractError, Result};
use crate::pipeline::ingestion::TabulaConfig;
use crate::pipeline::processing::schema::{FlangeContext, FlangeSchema, PipeSchema};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tabula: TabulaConfig,
    pub flange: FlangeConfig,
    pub pipe: PipeConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FlangeConfig {
    pub standard: String,
    pub source_file: String,
    pub category: String,
    pub rating_class: Option<i64>,
    pub flange_type: Option<String>,
    pub facing: Option<String>,
}

impl Default for FlangeConfig {
    fn default() -> Self {
        Self {
            standard: FLANGE_STANDARD_NAME.to_string(),
            source_file: FLANGE_SOURCE_FILE_NAME.to_string(),
            category: DEFAULT_CATEGORY.to_string(),
            rating_class: None,
            flange_type: None,
            facing: None,
        }
    }
}

impl FlangeConfig {
    pub fn schema(&self) -> FlangeSchema {
        FlangeSchema::new(
            self.standard.clone(),
            self.source_file.clone(),
            self.category.clone(),
            FlangeContext {
                rating_class: self.rating_class,
                flange_type: self.flange_type.clone(),
                facing: self.facing.clone(),
            },
        )
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PipeConfig {
    pub standard: String,
    pub source_file: String,
    pub category: String,
}

impl Default for PipeConfig {
    fn default() -> Self {
        Self {
            standard: PIPE_STANDARD_NAME.to_string(),
            source_file: PIPE_SOURCE_FILE_NAME.to_string(),
            category: DEFAULT_CATEGORY.to_string(),
        }
    }
}

impl PipeConfig {
    pub fn schema(&self) -> PipeSchema {
        PipeSchema::new(
            self.standard.clone(),
            self.source_file.clone(),
            self.category.clone(),
        )
    }
}

impl Config {
    /// Load from an explicit path, else `asme_dimensions.toml` in the working
    /// directory if present, else defaults. Environment overrides apply last.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => {
                debug!("No config file, using defaults");
                Self::default()
            }
        };
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ExtractError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(jar) = std::env::var("TABULA_JAR") {
            if !jar.trim().is_empty() {
                self.tabula.jar = Some(PathBuf::from(jar));
            }
        }
        if let Ok(java) = std::env::var("TABULA_JAVA") {
            if !java.trim().is_empty() {
                self.tabula.java = java;
            }
        }
    }
}
