//! Group complaint records by `(product, year)` and compute per-group statistics.
//!
//! # Architecture
//!
//! ```text
//! Records                                Aggregates
//! ┌───────────────────────────────┐      ┌─────────────────────────────┐
//! │ loans, 2020, banka            │      │ (loans, 2020)               │
//! │ loans, 2020, banka            │  →   │ total 3, companies 2, 67%   │
//! │ loans, 2020, bankb            │      └─────────────────────────────┘
//! └───────────────────────────────┘
//! ```
//!
//! Counting happens in [`GroupTally`]; [`GroupTally::finish`] turns a tally
//! into an immutable [`GroupAggregate`]. The returned map carries no ordering,
//! the report writer sorts.

use std::collections::HashMap;

use crate::models::{ComplaintRecord, GroupAggregate, GroupKey, ShareMetric};

/// Group records and finalize every group with the given share definition.
pub fn aggregate<'a, I>(records: I, metric: ShareMetric) -> HashMap<GroupKey, GroupAggregate>
where
    I: IntoIterator<Item = &'a ComplaintRecord>,
{
    let mut tallies: HashMap<GroupKey, GroupTally> = HashMap::new();

    for record in records {
        tallies.entry(record.key()).or_default().add(&record.company);
    }

    tallies
        .into_iter()
        .map(|(key, tally)| (key, tally.finish(metric)))
        .collect()
}

/// Working state for one group while records are being counted.
#[derive(Debug, Default)]
pub struct GroupTally {
    total: u64,
    companies: HashMap<String, u64>,
}

impl GroupTally {
    pub fn add(&mut self, company: &str) {
        self.total += 1;
        *self.companies.entry(company.to_string()).or_insert(0) += 1;
    }

    pub fn finish(self, metric: ShareMetric) -> GroupAggregate {
        let distinct = self.companies.len() as u64;
        let numerator = match metric {
            ShareMetric::MaxShare => self.companies.values().copied().max().unwrap_or(0),
            ShareMetric::DiversityShare => distinct,
        };

        GroupAggregate {
            total_complaints: self.total,
            distinct_companies: distinct,
            top_company_share: rounded_percent(numerator, self.total),
        }
    }
}

/// `numerator / denominator * 100`, rounded half to even.
///
/// Computed on integers so `.5` boundaries are exact. A zero denominator gives 0.
pub fn rounded_percent(numerator: u64, denominator: u64) -> u64 {
    if denominator == 0 {
        return 0;
    }

    let scaled = numerator * 100;
    let quotient = scaled / denominator;
    let twice_remainder = (scaled % denominator) * 2;

    if twice_remainder > denominator || (twice_remainder == denominator && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Normalization;

    fn record(product: &str, date: &str, company: &str) -> ComplaintRecord {
        ComplaintRecord::from_raw(product, date, company, Normalization::default())
    }

    fn loans_scenario() -> Vec<ComplaintRecord> {
        vec![
            record("Loans", "2020-05-01", "BankA"),
            record("Loans", "2020-07-01", "BankA"),
            record("Loans", "2020-08-01", "BankB"),
        ]
    }

    #[test]
    fn test_loans_scenario_max_share() {
        let groups = aggregate(&loans_scenario(), ShareMetric::MaxShare);

        assert_eq!(groups.len(), 1);
        let agg = groups[&GroupKey::new("loans", "2020")];
        assert_eq!(agg.total_complaints, 3);
        assert_eq!(agg.distinct_companies, 2);
        assert_eq!(agg.top_company_share, 67);
    }

    #[test]
    fn test_loans_scenario_diversity_share() {
        let groups = aggregate(&loans_scenario(), ShareMetric::DiversityShare);

        let agg = groups[&GroupKey::new("loans", "2020")];
        assert_eq!(agg.total_complaints, 3);
        assert_eq!(agg.distinct_companies, 2);
        assert_eq!(agg.top_company_share, 67);
    }

    #[test]
    fn test_definitions_diverge() {
        let records = vec![
            record("Mortgage", "2019-01-01", "A"),
            record("Mortgage", "2019-01-02", "A"),
            record("Mortgage", "2019-01-03", "A"),
            record("Mortgage", "2019-01-04", "B"),
        ];
        let key = GroupKey::new("mortgage", "2019");

        let max = aggregate(&records, ShareMetric::MaxShare);
        let diversity = aggregate(&records, ShareMetric::DiversityShare);

        assert_eq!(max[&key].top_company_share, 75);
        assert_eq!(diversity[&key].top_company_share, 50);
    }

    #[test]
    fn test_case_folded_products_share_group() {
        let records = vec![
            record("Credit Card", "2020-01-01", "A"),
            record("credit card", "2020-02-01", "a"),
        ];
        let groups = aggregate(&records, ShareMetric::MaxShare);

        assert_eq!(groups.len(), 1);
        let agg = groups[&GroupKey::new("credit card", "2020")];
        assert_eq!(agg.total_complaints, 2);
        assert_eq!(agg.distinct_companies, 1);
        assert_eq!(agg.top_company_share, 100);
    }

    #[test]
    fn test_groups_split_by_year() {
        let records = vec![
            record("Loans", "2019-12-31", "A"),
            record("Loans", "2020-01-01", "A"),
            record("Mortgage", "2020-01-01", "A"),
        ];
        let groups = aggregate(&records, ShareMetric::MaxShare);

        assert_eq!(groups.len(), 3);
        assert!(groups.contains_key(&GroupKey::new("loans", "2019")));
        assert!(groups.contains_key(&GroupKey::new("loans", "2020")));
        assert!(groups.contains_key(&GroupKey::new("mortgage", "2020")));
    }

    #[test]
    fn test_counts_cover_every_record() {
        let records: Vec<_> = (0..50)
            .map(|i| {
                record(
                    ["loans", "mortgage", "credit card"][i % 3],
                    &format!("{}-01-01", 2017 + i % 4),
                    &format!("company {}", i % 7),
                )
            })
            .collect();

        for metric in [ShareMetric::MaxShare, ShareMetric::DiversityShare] {
            let groups = aggregate(&records, metric);
            let total: u64 = groups.values().map(|a| a.total_complaints).sum();
            assert_eq!(total, records.len() as u64);

            for agg in groups.values() {
                assert!(agg.distinct_companies >= 1);
                assert!(agg.distinct_companies <= agg.total_complaints);
                assert!(agg.top_company_share <= 100);
            }
        }
    }

    #[test]
    fn test_empty_input_yields_no_groups() {
        let groups = aggregate(&Vec::<ComplaintRecord>::new(), ShareMetric::MaxShare);
        assert!(groups.is_empty());
    }

    #[test]
    fn test_rounded_percent_half_to_even() {
        assert_eq!(rounded_percent(1, 8), 12); // 12.5
        assert_eq!(rounded_percent(3, 8), 38); // 37.5
        assert_eq!(rounded_percent(1, 2), 50);
        assert_eq!(rounded_percent(2, 3), 67);
        assert_eq!(rounded_percent(1, 3), 33);
        assert_eq!(rounded_percent(1, 200), 0); // 0.5
        assert_eq!(rounded_percent(3, 200), 2); // 1.5
        assert_eq!(rounded_percent(5, 5), 100);
        assert_eq!(rounded_percent(1, 0), 0);
    }
}
