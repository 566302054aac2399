//! Domain models for the complaints report pipeline.
//!
//! - [`ComplaintRecord`] - one normalized complaint row
//! - [`GroupKey`] - the `(product, year)` pair a report row is keyed by
//! - [`GroupAggregate`] - finalized statistics for one group
//! - [`ShareMetric`] - which top-company share definition is computed
//! - [`Normalization`] / [`RowPolicy`] - parsing options

use serde::{Deserialize, Serialize};

// =============================================================================
// Complaint Record
// =============================================================================

/// A complaint row after normalization.
///
/// Every field is always present; an empty input cell yields an empty string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintRecord {
    /// Case-folded product name.
    pub product: String,
    /// Case-folded `Date received` value, as found in the input.
    pub date_received: String,
    /// Portion of `date_received` before the first `-`.
    pub year: String,
    /// Case-folded company name.
    pub company: String,
}

impl ComplaintRecord {
    /// Build a record from the three raw input cells.
    pub fn from_raw(
        product: &str,
        date_received: &str,
        company: &str,
        normalization: Normalization,
    ) -> Self {
        let date_received = date_received.to_lowercase();
        let year = date_received
            .split('-')
            .next()
            .unwrap_or_default()
            .to_string();

        Self {
            product: normalization.apply(product),
            date_received,
            year,
            company: normalization.apply(company),
        }
    }

    /// The group this record is counted in.
    pub fn key(&self) -> GroupKey {
        GroupKey {
            product: self.product.clone(),
            year: self.year.clone(),
        }
    }
}

// =============================================================================
// Group Key / Aggregate
// =============================================================================

/// `(product, year)` pair identifying one report row.
///
/// Ordering is lexical on `product`, then lexical on `year`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupKey {
    pub product: String,
    pub year: String,
}

impl GroupKey {
    pub fn new(product: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            product: product.into(),
            year: year.into(),
        }
    }
}

/// Finalized statistics for one group.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GroupAggregate {
    pub total_complaints: u64,
    pub distinct_companies: u64,
    /// Whole percentage in `0..=100`, per the run's [`ShareMetric`].
    pub top_company_share: u64,
}

// =============================================================================
// Options
// =============================================================================

/// Definition used for [`GroupAggregate::top_company_share`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ShareMetric {
    /// Share of complaints filed against the most complained-about company.
    #[default]
    MaxShare,
    /// Distinct company count as a share of complaints.
    DiversityShare,
}

/// Text normalization applied to `Product` and `Company`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Normalization {
    /// Strip surrounding whitespace before case-folding.
    pub trim: bool,
}

impl Default for Normalization {
    fn default() -> Self {
        Self { trim: true }
    }
}

impl Normalization {
    pub fn apply(&self, value: &str) -> String {
        if self.trim {
            value.trim().to_lowercase()
        } else {
            value.to_lowercase()
        }
    }
}

/// What to do with a row whose field count differs from the header.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RowPolicy {
    /// Abort the run with [`crate::error::CsvError::MalformedRow`].
    #[default]
    Fail,
    /// Drop the row and count it.
    Skip,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_case_folds_and_trims() {
        let record = ComplaintRecord::from_raw(
            "  Credit Card ",
            "2019-03-04",
            " Big Bank\t",
            Normalization::default(),
        );

        assert_eq!(record.product, "credit card");
        assert_eq!(record.company, "big bank");
        assert_eq!(record.year, "2019");
        assert_eq!(record.date_received, "2019-03-04");
    }

    #[test]
    fn test_record_without_trim_keeps_whitespace() {
        let record = ComplaintRecord::from_raw(
            " Loans",
            "2020-01-01",
            "BankA ",
            Normalization { trim: false },
        );

        assert_eq!(record.product, " loans");
        assert_eq!(record.company, "banka ");
    }

    #[test]
    fn test_empty_cells_yield_empty_fields() {
        let record = ComplaintRecord::from_raw("", "", "", Normalization::default());

        assert_eq!(record.product, "");
        assert_eq!(record.year, "");
        assert_eq!(record.company, "");
    }

    #[test]
    fn test_date_without_dash_is_whole_year() {
        let record = ComplaintRecord::from_raw("x", "2021", "y", Normalization::default());
        assert_eq!(record.year, "2021");
    }

    #[test]
    fn test_group_key_orders_product_then_year() {
        let mut keys = vec![
            GroupKey::new("mortgage", "2019"),
            GroupKey::new("credit card", "2020"),
            GroupKey::new("credit card", "2019"),
        ];
        keys.sort();

        assert_eq!(keys[0], GroupKey::new("credit card", "2019"));
        assert_eq!(keys[1], GroupKey::new("credit card", "2020"));
        assert_eq!(keys[2], GroupKey::new("mortgage", "2019"));
    }

    #[test]
    fn test_share_metric_serde_names() {
        let json = serde_json::to_string(&ShareMetric::DiversityShare).unwrap();
        assert_eq!(json, "\"diversity-share\"");
        assert_eq!(ShareMetric::default(), ShareMetric::MaxShare);
    }
}
