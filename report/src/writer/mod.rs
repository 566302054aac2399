//! Summary report serialization.
//!
//! One line per group, sorted by `(product, year)`, no header:
//!
//! ```text
//! credit card,2019,4,2,75
//! "credit, card",2020,1,1,100
//! ```
//!
//! The product is wrapped in double quotes when it contains a comma. Embedded
//! quotes are written as is.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{ReportError, ReportResult};
use crate::models::{GroupAggregate, GroupKey};

/// Groups in report order.
pub fn sorted_groups(
    groups: &HashMap<GroupKey, GroupAggregate>,
) -> Vec<(&GroupKey, &GroupAggregate)> {
    let mut rows: Vec<_> = groups.iter().collect();
    rows.sort_by(|a, b| a.0.cmp(b.0));
    rows
}

/// Render the whole report in memory.
pub fn render_report(groups: &HashMap<GroupKey, GroupAggregate>) -> ReportResult<String> {
    let mut out = String::new();

    for (key, agg) in sorted_groups(groups) {
        let year = format_year(key)?;
        out.push_str(&format!(
            "{},{},{},{},{}\n",
            format_product(&key.product),
            year,
            agg.total_complaints,
            agg.distinct_companies,
            agg.top_company_share,
        ));
    }

    Ok(out)
}

/// Render the report and write it to `path`, replacing any existing file.
///
/// Nothing is written if rendering fails.
pub fn write_report(groups: &HashMap<GroupKey, GroupAggregate>, path: &Path) -> ReportResult<()> {
    let content = render_report(groups)?;

    std::fs::write(path, content).map_err(|source| ReportError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })
}

fn format_product(product: &str) -> String {
    if product.contains(',') {
        format!("\"{}\"", product)
    } else {
        product.to_string()
    }
}

/// Year as a plain integer: surrounding whitespace, a `+` sign and leading
/// zeros dropped. Any digit count is accepted.
fn format_year(key: &GroupKey) -> ReportResult<String> {
    let invalid = || ReportError::InvalidYear {
        product: key.product.clone(),
        year: key.year.clone(),
    };

    let text = key.year.trim();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let digits = digits.trim_start_matches('0');
    Ok(match (negative, digits.is_empty()) {
        (_, true) => "0".to_string(),
        (true, false) => format!("-{}", digits),
        (false, false) => digits.to_string(),
    })
}
