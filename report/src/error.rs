//! Error types for the complaints report pipeline.
//!
//! - [`CsvError`] - reading, decoding and parsing the complaint export
//! - [`ReportError`] - rendering and writing the summary report
//! - [`PipelineError`] - top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use std::path::PathBuf;

use thiserror::Error;

// =============================================================================
// CSV Parsing Errors
// =============================================================================

/// Errors while turning the input file into complaint records.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Input path does not exist or cannot be opened.
    #[error("Cannot read input file '{}': {source}", .path.display())]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No header row.
    #[error("Input is empty, a header row is required")]
    EmptyInput,

    /// A required column is absent from the header row.
    #[error("Missing required column '{0}' in header")]
    MissingColumn(String),

    /// A data row does not have as many fields as the header.
    #[error("Line {line}: expected {expected} fields, found {found}")]
    MalformedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// Low-level CSV reader error.
    #[error("Invalid CSV: {0}")]
    Csv(#[from] csv::Error),
}

// =============================================================================
// Report Errors
// =============================================================================

/// Errors while rendering or writing the report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The year of a group cannot be written as an integer.
    #[error("Invalid year '{year}' for product '{product}'")]
    InvalidYear { product: String, year: String },

    /// Output path cannot be created or written.
    #[error("Cannot write output file '{}': {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline errors, returned by [`crate::transform::pipeline::run`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input error.
    #[error("Input error: {0}")]
    Csv(#[from] CsvError),

    /// Report error.
    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    /// Serializing the verbose dump failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for report operations.
pub type ReportResult<T> = Result<T, ReportError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
