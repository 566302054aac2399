//! Complaints CLI - summarize a complaint export per product and year
//!
//! ```bash
//! complaints complaints.csv report.csv
//! complaints complaints.csv report.csv --share diversity
//! complaints complaints.csv report.csv --skip-malformed --no-trim -v
//! ```

use clap::{Parser, ValueEnum};
use complaints::logs::{log_error, log_success};
use complaints::{run, Normalization, ReportOptions, RowPolicy, ShareMetric};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "complaints")]
#[command(about = "Summarize consumer complaints per product and year", long_about = None)]
struct Cli {
    /// Input complaint export (CSV with a header row)
    input: PathBuf,

    /// Report file to create or overwrite
    output: PathBuf,

    /// Definition of the top-company share column
    #[arg(long, value_enum, default_value_t = ShareArg::Max)]
    share: ShareArg,

    /// Keep surrounding whitespace in product and company names
    #[arg(long)]
    no_trim: bool,

    /// Drop rows with the wrong number of fields instead of failing
    #[arg(long)]
    skip_malformed: bool,

    /// Dump parsed records and aggregates as JSON on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ShareArg {
    /// Share of the most complained-about company
    Max,
    /// Distinct companies as a share of complaints
    Diversity,
}

impl From<ShareArg> for ShareMetric {
    fn from(arg: ShareArg) -> Self {
        match arg {
            ShareArg::Max => ShareMetric::MaxShare,
            ShareArg::Diversity => ShareMetric::DiversityShare,
        }
    }
}

impl Cli {
    fn options(&self) -> ReportOptions {
        ReportOptions {
            share: self.share.into(),
            normalization: Normalization { trim: !self.no_trim },
            row_policy: if self.skip_malformed {
                RowPolicy::Skip
            } else {
                RowPolicy::Fail
            },
            verbose: self.verbose,
        }
    }
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match run(&cli.input, &cli.output, &cli.options()) {
        Ok(summary) => {
            log_success(format!(
                "Done: {} complaints, {} groups",
                summary.rows, summary.groups
            ));
        }
        Err(e) => {
            log_error(format!("Error: {}", e));
            std::process::exit(1);
        }
    }
}
