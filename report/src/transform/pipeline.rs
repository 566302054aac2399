//! End-to-end pipeline: parse, aggregate, write.
//!
//! # Example
//!
//! ```rust,ignore
//! use complaints::{run, ReportOptions};
//! use std::path::Path;
//!
//! let summary = run(
//!     Path::new("complaints.csv"),
//!     Path::new("report.csv"),
//!     &ReportOptions::default(),
//! )?;
//! println!("{} groups", summary.groups);
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::aggregator::aggregate;
use crate::error::PipelineResult;
use crate::logs::{log_info, log_info_indent, log_success, log_warning};
use crate::models::{GroupAggregate, GroupKey, Normalization, RowPolicy, ShareMetric};
use crate::parser::{parse_file, ParseOptions};
use crate::writer::{sorted_groups, write_report};

/// Options for one report run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportOptions {
    /// Definition of the top-company share column
    pub share: ShareMetric,

    /// Text normalization for product and company
    pub normalization: Normalization,

    /// Handling of rows with the wrong number of fields
    pub row_policy: RowPolicy,

    /// Dump parsed records and aggregates as JSON on stderr
    pub verbose: bool,
}

impl ReportOptions {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            normalization: self.normalization,
            row_policy: self.row_policy,
        }
    }
}

/// What a run did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub encoding: String,
    /// Records counted
    pub rows: usize,
    /// Rows dropped as malformed
    pub skipped: usize,
    /// Lines written
    pub groups: usize,
}

#[derive(Serialize)]
struct GroupRow<'a> {
    #[serde(flatten)]
    key: &'a GroupKey,
    #[serde(flatten)]
    aggregate: &'a GroupAggregate,
}

/// Read `input`, summarize it and write the report to `output`.
pub fn run(input: &Path, output: &Path, options: &ReportOptions) -> PipelineResult<RunSummary> {
    log_info(format!("📖 Reading {}", input.display()));
    let parsed = parse_file(input, options.parse_options())?;
    log_success(format!("Detected encoding: {}", parsed.encoding));
    log_success(format!("Read {} complaints", parsed.records.len()));
    if parsed.skipped > 0 {
        log_warning(format!("Skipped {} malformed rows", parsed.skipped));
    }

    if options.verbose {
        eprintln!("{}", serde_json::to_string_pretty(&parsed.records)?);
    }

    log_info(format!("📦 Grouping by product and year ({:?})...", options.share));
    let groups = aggregate(&parsed.records, options.share);
    log_success(format!("{} groups", groups.len()));

    if options.verbose {
        dump_groups(&groups)?;
    }

    write_report(&groups, output)?;
    log_info_indent(format!("💾 Report written to {}", output.display()), 1);

    Ok(RunSummary {
        encoding: parsed.encoding,
        rows: parsed.records.len(),
        skipped: parsed.skipped,
        groups: groups.len(),
    })
}

fn dump_groups(groups: &HashMap<GroupKey, GroupAggregate>) -> PipelineResult<()> {
    let rows: Vec<GroupRow> = sorted_groups(groups)
        .into_iter()
        .map(|(key, aggregate)| GroupRow { key, aggregate })
        .collect();
    eprintln!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}
