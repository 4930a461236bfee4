// StartupLens - core/aggregate.rs
//
// Summary statistics over a (usually already filtered) record collection.
// Core layer: pure functions, no I/O.

use crate::core::filter::ValuationBucket;
use crate::core::model::{ScoreCategory, StartupRecord};
use crate::util::constants;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Limits for the ranked lists in `SummaryStats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateConfig {
    /// Maximum number of industries in `top_industries`.
    pub top_industries: usize,
    /// Maximum number of records in `top_by_overall_score`.
    pub top_startups: usize,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            top_industries: constants::DEFAULT_TOP_INDUSTRIES,
            top_startups: constants::DEFAULT_TOP_STARTUPS,
        }
    }
}

/// Dashboard statistics for a record collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Number of records aggregated.
    pub total: usize,

    /// Mean valuation in millions over records with a known valuation.
    /// Zero when no valuation is known.
    pub average_valuation_millions: f64,

    /// Mean score per category. Always holds every category. The divisor is
    /// `total`, so records without a score count as zero.
    pub average_scores: BTreeMap<ScoreCategory, f64>,

    /// Distinct industries in order of first appearance (not a frequency
    /// ranking), truncated.
    pub top_industries: Vec<String>,

    /// Records sorted by overall score, highest first, ties in input order.
    pub top_by_overall_score: Vec<StartupRecord>,

    /// Records valued at $1B or more.
    pub unicorn_count: usize,
}

/// Aggregate with the default limits (3 industries, 6 startups).
pub fn aggregate(records: &[StartupRecord]) -> SummaryStats {
    aggregate_with(records, &AggregateConfig::default())
}

/// Aggregate with explicit limits for the ranked lists.
pub fn aggregate_with(records: &[StartupRecord], config: &AggregateConfig) -> SummaryStats {
    let total = records.len();

    let known_valuations: Vec<f64> = records
        .iter()
        .filter_map(|r| r.valuation.millions())
        .collect();
    let average_valuation_millions = mean(known_valuations.iter().sum(), known_valuations.len());

    let average_scores = ScoreCategory::all()
        .iter()
        .map(|&category| {
            let sum: f64 = records.iter().filter_map(|r| r.score(category)).sum();
            (category, mean(sum, total))
        })
        .collect();

    let mut seen = HashSet::new();
    let top_industries = records
        .iter()
        .filter(|r| seen.insert(r.industry.as_str()))
        .take(config.top_industries)
        .map(|r| r.industry.clone())
        .collect();

    // sort_by is stable, so equal scores keep their input order.
    let mut order: Vec<usize> = (0..total).collect();
    order.sort_by(|&a, &b| {
        records[b]
            .overall_score()
            .total_cmp(&records[a].overall_score())
    });
    let top_by_overall_score = order
        .into_iter()
        .take(config.top_startups)
        .map(|idx| records[idx].clone())
        .collect();

    let unicorn_count = records
        .iter()
        .filter(|r| ValuationBucket::Over1B.contains(r.valuation.millions()))
        .count();

    tracing::debug!(
        total,
        known_valuations = known_valuations.len(),
        unicorns = unicorn_count,
        "Summary computed"
    );

    SummaryStats {
        total,
        average_valuation_millions,
        average_scores,
        top_industries,
        top_by_overall_score,
        unicorn_count,
    }
}

/// `sum / count`, or zero when `count` is zero.
fn mean(sum: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Render a valuation in millions as `$X.XB`.
pub fn format_billions(millions: f64) -> String {
    format!("${:.1}B", millions / constants::MILLIONS_PER_BILLION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{Scores, Valuation, ValuationUnit};

    fn make_record(name: &str, industry: &str, valuation: Valuation, overall: Option<f64>) -> StartupRecord {
        let scores = overall.map(|o| {
            let mut s = Scores::new();
            for category in ScoreCategory::all() {
                s.insert(*category, o);
            }
            s
        });
        StartupRecord {
            name: name.to_string(),
            description: String::new(),
            industry: industry.to_string(),
            tech_stack: Vec::new(),
            valuation,
            scores,
        }
    }

    #[test]
    fn test_aggregate_empty_is_all_zero() {
        let stats = aggregate(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.average_valuation_millions, 0.0);
        assert_eq!(stats.average_scores.len(), 5);
        assert!(stats.average_scores.values().all(|v| *v == 0.0));
        assert!(stats.top_industries.is_empty());
        assert!(stats.top_by_overall_score.is_empty());
        assert_eq!(stats.unicorn_count, 0);
    }

    #[test]
    fn test_average_valuation_skips_unknown() {
        let records = vec![
            make_record("A", "AI/ML", Valuation::from_parts("100", ValuationUnit::Millions), None),
            make_record("B", "AI/ML", Valuation::from_parts("1", ValuationUnit::Billions), None),
            make_record("C", "AI/ML", Valuation::Unknown, None),
        ];
        let stats = aggregate(&records);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.average_valuation_millions, 550.0);
        assert_eq!(stats.unicorn_count, 1);
    }

    #[test]
    fn test_average_valuation_all_unknown_is_zero() {
        let records = vec![
            make_record("A", "X", Valuation::Unknown, None),
            make_record("B", "Y", Valuation::Unknown, None),
        ];
        let stats = aggregate(&records);
        assert_eq!(stats.average_valuation_millions, 0.0);
        assert!(!stats.average_valuation_millions.is_nan());
    }

    #[test]
    fn test_missing_scores_count_as_zero() {
        let records = vec![
            make_record("A", "X", Valuation::Unknown, Some(80.0)),
            make_record("B", "X", Valuation::Unknown, None),
        ];
        let stats = aggregate(&records);
        for category in ScoreCategory::all() {
            assert_eq!(stats.average_scores[category], 40.0, "{category}");
        }
    }

    #[test]
    fn test_partial_scores_divide_by_total() {
        let mut only_market = Scores::new();
        only_market.insert(ScoreCategory::Market, 90.0);
        let mut a = make_record("A", "X", Valuation::Unknown, None);
        a.scores = Some(only_market);
        let b = make_record("B", "X", Valuation::Unknown, Some(60.0));

        let stats = aggregate(&[a, b]);
        assert_eq!(stats.average_scores[&ScoreCategory::Market], 75.0);
        assert_eq!(stats.average_scores[&ScoreCategory::Team], 30.0);
    }

    #[test]
    fn test_top_industries_first_seen_order() {
        let records: Vec<_> = ["Fintech", "AI/ML", "Fintech", "EdTech", "Healthcare", "AI/ML"]
            .iter()
            .enumerate()
            .map(|(i, ind)| make_record(&format!("S{i}"), ind, Valuation::Unknown, None))
            .collect();
        let stats = aggregate(&records);
        assert_eq!(stats.top_industries, vec!["Fintech", "AI/ML", "EdTech"]);
    }

    #[test]
    fn test_top_by_overall_score_sorted_and_stable() {
        let overall = [70.0, 90.0, 65.0, 90.0, 80.0, 70.0, 99.0, 60.0];
        let records: Vec<_> = overall
            .iter()
            .enumerate()
            .map(|(i, o)| make_record(&format!("S{i}"), "X", Valuation::Unknown, Some(*o)))
            .collect();

        let stats = aggregate(&records);
        let ranked: Vec<_> = stats
            .top_by_overall_score
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(ranked, vec!["S6", "S1", "S3", "S4", "S0", "S5"]);
        assert_eq!(stats.total, 8);
    }

    #[test]
    fn test_unscored_records_rank_last() {
        let records = vec![
            make_record("None", "X", Valuation::Unknown, None),
            make_record("Low", "X", Valuation::Unknown, Some(10.0)),
        ];
        let stats = aggregate(&records);
        assert_eq!(stats.top_by_overall_score[0].name, "Low");
    }

    #[test]
    fn test_aggregate_with_custom_limits() {
        let records: Vec<_> = (0..5)
            .map(|i| make_record(&format!("S{i}"), &format!("I{i}"), Valuation::Unknown, Some(i as f64)))
            .collect();
        let config = AggregateConfig {
            top_industries: 1,
            top_startups: 2,
        };
        let stats = aggregate_with(&records, &config);
        assert_eq!(stats.top_industries, vec!["I0"]);
        assert_eq!(stats.top_by_overall_score.len(), 2);
        assert_eq!(stats.top_by_overall_score[0].name, "S4");
    }

    #[test]
    fn test_format_billions() {
        assert_eq!(format_billions(550.0), "$0.6B");
        assert_eq!(format_billions(1200.0), "$1.2B");
        assert_eq!(format_billions(0.0), "$0.0B");
    }
}
