//! Fixed paths and labels used by the entry point.

use std::path::PathBuf;

/// Input file read when no other path is configured.
pub const DEFAULT_INPUT_PATH: &str = "data.csv";

/// Output file written when no other path is configured.
pub const DEFAULT_OUTPUT_PATH: &str = "report.pdf";

/// Title drawn in the header band of every page.
pub const DEFAULT_TITLE: &str = "CODTECH - Automated Report";

/// Paths and title for one report run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub title: String,
}

impl ReportConfig {
    /// Creates a configuration with the default title.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            title: DEFAULT_TITLE.to_owned(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH)
    }
}
