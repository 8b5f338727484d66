//! Error types for the grade report pipeline.
//!
//! - [`LoadError`] covers reading and validating the input table
//! - [`RenderError`] covers font loading, layout and writing the document
//! - [`ReportError`] wraps both for the entry point
//!
//! Conversions are provided through `From` so `?` works across the stages.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading the marks table.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The input file does not exist.
    #[error("Data file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// Required header fields are absent.
    #[error("CSV must contain 'Name' and 'Marks' columns (missing: {})", .missing.join(", "))]
    Schema { missing: Vec<String> },

    /// A `Marks` value could not be read as a number.
    #[error("All 'Marks' values must be numeric (row {row}: {value:?})")]
    Type { row: usize, value: String },

    /// The file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The CSV text itself is malformed.
    #[error("Invalid CSV format: {0}")]
    Malformed(#[from] csv::Error),
}

/// Errors raised while producing the PDF document.
#[derive(Debug, Error)]
pub enum RenderError {
    /// No usable font family could be loaded.
    #[error("Failed to load fonts: {0}")]
    Font(#[source] genpdf::error::Error),

    /// genpdf rejected the layout or failed while rendering pages.
    #[error("Failed to render document: {0}")]
    Layout(#[from] genpdf::error::Error),

    /// The rendered bytes could not be written to the output path.
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Top-level error returned by [`crate::run_with`].
#[derive(Debug, Error)]
pub enum ReportError {
    /// Loading the input failed.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Rendering the report failed.
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl ReportError {
    /// Returns `true` when the failure happened before any rendering started.
    pub fn is_load(&self) -> bool {
        matches!(self, Self::Load(_))
    }
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_lists_missing_columns() {
        let err = LoadError::Schema {
            missing: vec!["Name".into(), "Marks".into()],
        };
        assert!(err.to_string().contains("missing: Name, Marks"));
    }

    #[test]
    fn load_error_converts_into_report_error() {
        let err: ReportError = LoadError::NotFound {
            path: PathBuf::from("data.csv"),
        }
        .into();
        assert!(err.is_load());
        assert_eq!(err.to_string(), "Data file not found: data.csv");
    }

    #[test]
    fn write_error_names_the_path() {
        let err: ReportError = RenderError::Write {
            path: PathBuf::from("out/report.pdf"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        }
        .into();
        assert!(!err.is_load());
        assert!(err.to_string().contains("out/report.pdf"));
    }
}
