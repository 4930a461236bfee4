// StartupLens - core/filter.rs
//
// Composable filter engine for startup records.
// All active filters are AND-combined.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::model::StartupRecord;
use crate::util::constants;
use crate::util::error::FilterError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Valuation buckets
// =============================================================================

/// Named valuation range. Ranges are half-open in millions:
/// `<100`, `[100, 500)`, `[500, 1000)`, `[1000, inf)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ValuationBucket {
    #[default]
    All,
    #[serde(rename = "<100M")]
    Under100M,
    #[serde(rename = "100M-500M")]
    From100MTo500M,
    #[serde(rename = "500M-1B")]
    From500MTo1B,
    #[serde(rename = ">1B")]
    Over1B,
}

impl ValuationBucket {
    /// Returns all variants in display order.
    pub fn all() -> &'static [ValuationBucket] {
        &[
            ValuationBucket::All,
            ValuationBucket::Under100M,
            ValuationBucket::From100MTo500M,
            ValuationBucket::From500MTo1B,
            ValuationBucket::Over1B,
        ]
    }

    /// Canonical label, also accepted by `FromStr`.
    pub fn label(&self) -> &'static str {
        match self {
            ValuationBucket::All => constants::ALL_LABEL,
            ValuationBucket::Under100M => "<100M",
            ValuationBucket::From100MTo500M => "100M-500M",
            ValuationBucket::From500MTo1B => "500M-1B",
            ValuationBucket::Over1B => ">1B",
        }
    }

    /// Whether a valuation in millions falls in this bucket.
    /// Unknown valuations (`None`) only match `All`.
    pub fn contains(&self, millions: Option<f64>) -> bool {
        let Some(v) = millions else {
            return *self == ValuationBucket::All;
        };
        match self {
            ValuationBucket::All => true,
            ValuationBucket::Under100M => v < constants::BUCKET_SMALL_MAX_MILLIONS,
            ValuationBucket::From100MTo500M => {
                (constants::BUCKET_SMALL_MAX_MILLIONS..constants::BUCKET_MID_MAX_MILLIONS)
                    .contains(&v)
            }
            ValuationBucket::From500MTo1B => {
                (constants::BUCKET_MID_MAX_MILLIONS..constants::BUCKET_LARGE_MAX_MILLIONS)
                    .contains(&v)
            }
            ValuationBucket::Over1B => v >= constants::BUCKET_LARGE_MAX_MILLIONS,
        }
    }
}

impl fmt::Display for ValuationBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ValuationBucket {
    type Err = FilterError;

    /// Accepts the canonical labels plus the dashboard's menu labels
    /// (`< $100M`, `$100M - $500M`, `$500M - $1B`, `> $1B`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '$')
            .collect();
        match compact.to_ascii_uppercase().as_str() {
            "ALL" => Ok(ValuationBucket::All),
            "<100M" => Ok(ValuationBucket::Under100M),
            "100M-500M" => Ok(ValuationBucket::From100MTo500M),
            "500M-1B" => Ok(ValuationBucket::From500MTo1B),
            ">1B" => Ok(ValuationBucket::Over1B),
            _ => Err(FilterError::UnknownBucket {
                label: s.to_string(),
            }),
        }
    }
}

// =============================================================================
// Filter criteria
// =============================================================================

/// Complete filter state. All fields are AND-combined when applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    /// Exact industry to include. `None` = all industries.
    pub industry: Option<String>,

    /// Valuation range to include.
    pub valuation_bucket: ValuationBucket,

    /// Case-sensitive substring matched against each tech stack entry.
    /// `None` = no tech stack filter.
    pub tech_stack_term: Option<String>,

    /// Case-insensitive substring matched against name and description.
    /// Empty = no text filter.
    pub text_search: String,
}

impl FilterCriteria {
    /// Build criteria from the dashboard's select-box labels, where `"All"`
    /// disables a field.
    pub fn from_labels(industry: &str, bucket: &str, tech_stack: &str) -> Result<Self, FilterError> {
        Ok(Self {
            industry: label_to_option(industry),
            valuation_bucket: bucket.parse()?,
            tech_stack_term: label_to_option(tech_stack),
            text_search: String::new(),
        })
    }

    /// Create a quick-filter for unicorns (valuation of $1B or more).
    pub fn unicorns() -> Self {
        Self {
            valuation_bucket: ValuationBucket::Over1B,
            ..Default::default()
        }
    }

    /// Returns true if no filters are active.
    pub fn is_empty(&self) -> bool {
        self.industry.is_none()
            && self.valuation_bucket == ValuationBucket::All
            && self.tech_stack_term.is_none()
            && self.text_search.is_empty()
    }
}

/// Map a select-box label to an optional filter value; only `"All"` means
/// none. A blank label is a real term: as a tech stack term it matches every
/// record with a non-empty stack.
pub fn label_to_option(label: &str) -> Option<String> {
    let trimmed = label.trim();
    if trimmed == constants::ALL_LABEL {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// =============================================================================
// Application
// =============================================================================

/// Apply filters to a slice of records, returning indices of matching records.
///
/// Indices refer to the original slice and are in ascending order, so the
/// relative order of records is preserved.
pub fn matching_indices(records: &[StartupRecord], criteria: &FilterCriteria) -> Vec<usize> {
    if criteria.is_empty() {
        return (0..records.len()).collect();
    }

    let text_lower = criteria.text_search.to_lowercase();

    records
        .iter()
        .enumerate()
        .filter(|(_, record)| matches_all(record, criteria, &text_lower))
        .map(|(idx, _)| idx)
        .collect()
}

/// Apply filters and return the matching records as a new collection.
/// The input slice is never modified.
pub fn filter_records(records: &[StartupRecord], criteria: &FilterCriteria) -> Vec<StartupRecord> {
    let filtered: Vec<StartupRecord> = matching_indices(records, criteria)
        .into_iter()
        .map(|idx| records[idx].clone())
        .collect();

    tracing::debug!(
        input = records.len(),
        matched = filtered.len(),
        industry = criteria.industry.as_deref().unwrap_or(constants::ALL_LABEL),
        bucket = %criteria.valuation_bucket,
        tech = criteria.tech_stack_term.as_deref().unwrap_or(constants::ALL_LABEL),
        "Filters applied"
    );

    filtered
}

/// Check if a single record matches all active filters.
fn matches_all(record: &StartupRecord, criteria: &FilterCriteria, text_lower: &str) -> bool {
    if let Some(ref industry) = criteria.industry {
        if record.industry != *industry {
            return false;
        }
    }

    if !criteria
        .valuation_bucket
        .contains(record.valuation.millions())
    {
        return false;
    }

    if let Some(ref term) = criteria.tech_stack_term {
        if !record.tech_stack.iter().any(|tech| tech.contains(term.as_str())) {
            return false;
        }
    }

    if !text_lower.is_empty()
        && !record.name.to_lowercase().contains(text_lower)
        && !record.description.to_lowercase().contains(text_lower)
    {
        return false;
    }

    true
}
