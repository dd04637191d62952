use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

use super::TableSource;
use crate::error::{ExtractError, Result};
use crate::types::{Cell, PageRange, RawTable};

/// Tabula's table detection mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMethod {
    #[default]
    Stream,
    Lattice,
}

impl ExtractionMethod {
    fn flag(&self) -> &'static str {
        match self {
            ExtractionMethod::Stream => "--stream",
            ExtractionMethod::Lattice => "--lattice",
        }
    }
}

/// How to invoke tabula-java
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TabulaConfig {
    /// Java executable
    pub java: String,
    /// Path to the tabula-java jar with dependencies
    pub jar: Option<PathBuf>,
    pub method: ExtractionMethod,
    /// Let tabula guess the table area on each page
    pub guess: bool,
}

impl Default for TabulaConfig {
    fn default() -> Self {
        Self {
            java: "java".to_string(),
            jar: None,
            method: ExtractionMethod::Stream,
            guess: true,
        }
    }
}

/// A sequence of extracted tables, as written by `tabula --format JSON`
#[derive(Deserialize, Debug)]
#[serde(transparent)]
pub struct JsonTableSet(pub Vec<JsonTable>);

#[derive(Deserialize, Debug)]
pub struct JsonTable {
    #[serde(default)]
    pub extraction_method: String,
    #[serde(default)]
    pub page_number: i32,
    #[serde(default)]
    pub data: Vec<JsonRow>,
}

#[derive(Deserialize, Debug)]
pub struct JsonRow(pub Vec<JsonCell>);

#[derive(Deserialize, Debug)]
pub struct JsonCell {
    #[serde(default)]
    pub text: String,
}

impl From<JsonTable> for RawTable {
    fn from(table: JsonTable) -> Self {
        let rows = table
            .data
            .into_iter()
            .map(|row| row.0.into_iter().map(|cell| Cell::Text(cell.text)).collect())
            .collect();
        RawTable {
            rows,
            page: u32::try_from(table.page_number).ok().filter(|p| *p > 0),
        }
    }
}

/// Parse tabula's JSON output into raw tables
pub fn parse_tabula_json(text: &str) -> Result<Vec<RawTable>> {
    let set: JsonTableSet = serde_json::from_str(text)?;
    Ok(set.0.into_iter().map(RawTable::from).collect())
}

/// Runs tabula-java as a subprocess and reads its JSON from stdout
#[derive(Debug, Clone)]
pub struct TabulaCli {
    config: TabulaConfig,
}

impl TabulaCli {
    pub fn new(config: TabulaConfig) -> Self {
        Self { config }
    }

    fn command(&self, path: &Path, pages: &PageRange) -> Result<Command> {
        let jar = self.config.jar.as_ref().ok_or_else(|| {
            ExtractError::Config("no tabula jar configured (set [tabula] jar or TABULA_JAR)".to_string())
        })?;

        let mut cmd = Command::new(&self.config.java);
        cmd.arg("-jar")
            .arg(jar)
            .args(["--format", "JSON", "--pages", pages.as_arg()])
            .arg(self.config.method.flag());
        if self.config.guess {
            cmd.arg("--guess");
        }
        cmd.arg(path);
        Ok(cmd)
    }
}

impl TableSource for TabulaCli {
    fn extract(&self, path: &Path, pages: &PageRange) -> Result<Vec<RawTable>> {
        info!(pdf = %path.display(), pages = %pages, "Reading tables with tabula");
        let mut cmd = self.command(path, pages)?;
        debug!(command = ?cmd, "Spawning tabula");

        let output = cmd.output().map_err(|e| ExtractError::Extraction {
            message: format!("failed to run {}: {}", self.config.java, e),
        })?;
        if !output.status.success() {
            return Err(ExtractError::Extraction {
                message: format!(
                    "tabula exited with {}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        let tables = parse_tabula_json(&String::from_utf8_lossy(&output.stdout))?;
        info!(count = tables.len(), "Found raw tables");
        Ok(tables)
    }

    fn name(&self) -> &str {
        "tabula-cli"
    }
}

/// Reads a previously exported tabula JSON file. The page range has already
/// been applied at export time, so it is only logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct TabulaJsonFile;

impl TableSource for TabulaJsonFile {
    fn extract(&self, path: &Path, pages: &PageRange) -> Result<Vec<RawTable>> {
        info!(json = %path.display(), pages = %pages, "Reading exported tabula tables");
        let text = fs::read_to_string(path)?;
        let tables = parse_tabula_json(&text)?;
        info!(count = tables.len(), "Found raw tables");
        Ok(tables)
    }

    fn name(&self) -> &str {
        "tabula-json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample() -> serde_json::Value {
        json!([
            {
                "extraction_method": "stream",
                "page_number": 42,
                "top": 100.0, "left": 20.0, "width": 500.0, "height": 300.0,
                "right": 520.0, "bottom": 400.0,
                "data": [
                    [{"top": 1.0, "left": 1.0, "width": 1.0, "height": 1.0, "text": "NPS"},
                     {"text": "OD"}],
                    [{"text": "2"}, {"text": "6.00"}, {"text": "extra"}]
                ]
            },
            { "extraction_method": "stream", "page_number": 43, "data": [] }
        ])
    }

    #[test]
    fn test_parse_tabula_json() {
        let tables = parse_tabula_json(&sample().to_string()).unwrap();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].page, Some(42));
        assert_eq!(tables[0].width(), 3);
        assert_eq!(tables[0].rows[0][0], Cell::Text("NPS".to_string()));
        assert!(tables[1].rows.is_empty());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(parse_tabula_json("{not json"), Err(ExtractError::Json(_))));
    }

    #[test]
    fn test_json_file_source() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(sample().to_string().as_bytes()).unwrap();

        let tables = TabulaJsonFile.extract(file.path(), &PageRange::All).unwrap();
        assert_eq!(tables.len(), 2);
    }

    #[test]
    fn test_cli_requires_jar() {
        let cli = TabulaCli::new(TabulaConfig::default());
        let err = cli.extract(Path::new("x.pdf"), &PageRange::All).unwrap_err();
        assert!(matches!(err, ExtractError::Config(_)));
    }

    #[test]
    fn test_cli_command_line() {
        let cli = TabulaCli::new(TabulaConfig {
            jar: Some(PathBuf::from("tabula.jar")),
            method: ExtractionMethod::Lattice,
            guess: false,
            ..TabulaConfig::default()
        });
        let cmd = cli
            .command(Path::new("b165.pdf"), &PageRange::parse("50-150").unwrap())
            .unwrap();
        let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(
            args,
            vec!["-jar", "tabula.jar", "--format", "JSON", "--pages", "50-150", "--lattice", "b165.pdf"]
        );
    }
}
