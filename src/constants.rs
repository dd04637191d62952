/// Standard and source constants shared by the CLI, config defaults and schemas

// ASME B16.5 flanges
pub const FLANGE_STANDARD_NAME: &str = "ASME B16.5-2022";
pub const FLANGE_SOURCE_FILE_NAME: &str = "ASME B16.5.pdf";

// ASME B36.10M pipes
pub const PIPE_STANDARD_NAME: &str = "ASME B36.10M-2022";
pub const PIPE_SOURCE_FILE_NAME: &str = "ASME B36.10-2022.pdf";

/// Material category stamped on every record unless configured otherwise
pub const DEFAULT_CATEGORY: &str = "CS";

/// Weld-neck
pub const DEFAULT_FLANGE_TYPE: &str = "WN";
/// Raised-face
pub const DEFAULT_FLANGE_FACING: &str = "RF";

/// Minimum number of columns a raw table needs before it is considered at all
pub const MIN_TABLE_COLUMNS: usize = 4;

/// Page range handed to the extractor when the caller does not pass one
pub const DEFAULT_PAGES: &str = "all";

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "asme_dimensions.toml";

/// Build the display label for a table index, e.g. `Table_3`
pub fn table_label(index: usize) -> String {
    format!("Table_{}", index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_label() {
        assert_eq!(table_label(0), "Table_0");
        assert_eq!(table_label(12), "Table_12");
    }
}
