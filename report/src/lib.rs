//! # Complaints - per product and year complaint summaries
//!
//! Reads a consumer complaint export and reports, for every `(product, year)`
//! pair, how many complaints were filed, against how many distinct companies,
//! and what share went to the most complained-about company.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   CSV File  │────▶│   Parser    │────▶│ Aggregator  │────▶│ Report CSV  │
//! │  (any enc.) │     │ (normalize) │     │ (group/pct) │     │  (sorted)   │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use complaints::{run, ReportOptions};
//! use std::path::Path;
//!
//! let summary = run(Path::new("complaints.csv"), Path::new("report.csv"), &ReportOptions::default())?;
//! println!("Wrote {} groups", summary.groups);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`models`] - Records, group keys, aggregates and options
//! - [`parser`] - CSV decoding and normalization
//! - [`transform`] - Aggregation and the end-to-end pipeline
//! - [`writer`] - Report serialization
//! - [`logs`] - Progress logging

// Core modules
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Transformation
pub mod transform;

// Output
pub mod writer;

// Logging
pub mod logs;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{CsvError, PipelineError, ReportError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    ComplaintRecord,
    GroupKey,
    GroupAggregate,
    ShareMetric,
    Normalization,
    RowPolicy,
};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{
    parse_file,
    parse_bytes,
    parse_str,
    detect_encoding,
    decode_content,
    ParseOptions,
    ParseResult,
};

// =============================================================================
// Re-exports - Aggregation / Pipeline
// =============================================================================

pub use transform::{aggregate, rounded_percent, run, ReportOptions, RunSummary};

// =============================================================================
// Re-exports - Writer
// =============================================================================

pub use writer::{render_report, write_report};
