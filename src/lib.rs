//! Renders a paginated PDF grade report from a CSV file of student marks.
//!
//! The pipeline runs in three steps: [`loader::load`] validates the input
//! table, [`composer::compose`] computes the [`summary::Summary`] and renders
//! the document, and [`run`] ties both together for the binary.

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Local;

pub mod builder;
pub mod composer;
pub mod config;
pub mod elements;
pub mod error;
pub mod fonts;
pub mod layout;
pub mod loader;
pub mod summary;

pub use config::ReportConfig;
pub use error::{LoadError, RenderError, ReportError};
pub use loader::{Record, Table};
pub use summary::Summary;

/// Loads `config.input` and writes the report to `config.output`.
///
/// The input is fully validated before any output is produced, so a load
/// failure never leaves a file behind.
pub fn run_with(config: &ReportConfig) -> Result<PathBuf, ReportError> {
    let table = loader::load(&config.input)?;
    let written = composer::compose_at(
        &table,
        &config.output,
        &config.title,
        Local::now().naive_local(),
    )?;
    Ok(written)
}

/// Runs the report with the default paths and reports the outcome on stdout.
pub fn run() -> ExitCode {
    match run_with(&ReportConfig::default()) {
        Ok(path) => {
            println!("✅ Report successfully created: {}", path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            let stage = if err.is_load() {
                "reading data"
            } else {
                "generating PDF"
            };
            println!("❌ Error {stage}: {err}");
            ExitCode::FAILURE
        }
    }
}
