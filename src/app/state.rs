// StartupLens - app/state.rs
//
// Dashboard state: the current records snapshot, the active criteria, and
// the derived filtered view and statistics. Owned by the caller; the core
// pipeline functions only ever see slices and values passed to them.

use crate::core::aggregate::{self, AggregateConfig, SummaryStats};
use crate::core::filter::{self, FilterCriteria};
use crate::core::model::StartupRecord;
use crate::util::constants;

/// Top-level dashboard state.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// All loaded records, in source order.
    pub records: Vec<StartupRecord>,

    /// Current filter configuration.
    pub criteria: FilterCriteria,

    /// Indices of records matching `criteria` (into `records`).
    pub filtered_indices: Vec<usize>,

    /// Statistics over the filtered records.
    pub summary: SummaryStats,

    /// Limits for the ranked lists in `summary`.
    pub aggregate_config: AggregateConfig,

    /// Non-fatal warnings from the most recent load.
    pub warnings: Vec<String>,
}

impl DashboardState {
    pub fn new(aggregate_config: AggregateConfig) -> Self {
        Self {
            records: Vec::new(),
            criteria: FilterCriteria::default(),
            filtered_indices: Vec::new(),
            summary: aggregate::aggregate_with(&[], &aggregate_config),
            aggregate_config,
            warnings: Vec::new(),
        }
    }

    /// Swap in a new records snapshot and recompute the view.
    pub fn replace_records(&mut self, records: Vec<StartupRecord>, warnings: Vec<String>) {
        self.records = records;
        self.warnings = warnings;
        self.refresh();
    }

    /// Change the active criteria and recompute the view.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.refresh();
    }

    /// Recompute filtered indices and summary from records and criteria.
    pub fn refresh(&mut self) {
        self.filtered_indices = filter::matching_indices(&self.records, &self.criteria);
        let filtered = self.filtered_records();
        self.summary = aggregate::aggregate_with(&filtered, &self.aggregate_config);

        tracing::debug!(
            total = self.records.len(),
            matched = self.filtered_indices.len(),
            "Dashboard view refreshed"
        );
    }

    /// Records matching the current criteria, in source order.
    pub fn filtered_records(&self) -> Vec<StartupRecord> {
        self.filtered_indices
            .iter()
            .filter_map(|&idx| self.records.get(idx))
            .cloned()
            .collect()
    }

    /// Options for the industry select box: "All" followed by every
    /// distinct industry in first-seen order.
    pub fn industry_options(&self) -> Vec<String> {
        let mut options = vec![constants::ALL_LABEL.to_string()];
        for record in &self.records {
            if !options[1..].contains(&record.industry) {
                options.push(record.industry.clone());
            }
        }
        options
    }

    /// Options for the tech stack select box: "All" followed by every
    /// distinct technology in first-seen order.
    pub fn tech_stack_options(&self) -> Vec<String> {
        let mut options = vec![constants::ALL_LABEL.to_string()];
        for tech in self.records.iter().flat_map(|r| r.tech_stack.iter()) {
            if !options[1..].contains(tech) {
                options.push(tech.clone());
            }
        }
        options
    }

    /// Drop all records and reset the criteria.
    pub fn clear(&mut self) {
        self.records.clear();
        self.criteria = FilterCriteria::default();
        self.warnings.clear();
        self.refresh();
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(AggregateConfig::default())
    }
}
