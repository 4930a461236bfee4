// StartupLens - ui/report.rs
//
// Plain-text dashboard report for the terminal.
// Mirrors the dashboard cards: overview, active filters, top industries,
// average scores, top startups, and any load warnings.

use crate::app::state::DashboardState;
use crate::core::aggregate::format_billions;
use crate::core::filter::FilterCriteria;
use crate::core::model::{ScoreBand, ScoreCategory, StartupRecord};
use crate::util::constants;
use std::io::{self, Write};

const RULE_WIDTH: usize = 60;

/// Write the full report for the current dashboard view.
pub fn render<W: Write>(state: &DashboardState, mut out: W) -> io::Result<()> {
    let summary = &state.summary;

    heading(&mut out, "Overview")?;
    writeln!(out, "  Total startups:     {}", summary.total)?;
    writeln!(
        out,
        "  Average valuation:  {}",
        format_billions(summary.average_valuation_millions)
    )?;
    writeln!(out, "  Unicorns:           {}", summary.unicorn_count)?;
    if summary.total != state.records.len() {
        writeln!(out, "  Loaded:             {}", state.records.len())?;
    }

    heading(&mut out, "Filters")?;
    for line in describe_criteria(&state.criteria) {
        writeln!(out, "  {line}")?;
    }

    heading(&mut out, "Top Industries")?;
    if summary.top_industries.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for (rank, industry) in summary.top_industries.iter().enumerate() {
        writeln!(out, "  {}. {}", rank + 1, industry)?;
    }

    heading(&mut out, "Average Scores")?;
    for category in ScoreCategory::all() {
        let score = summary.average_scores.get(category).copied().unwrap_or(0.0);
        writeln!(
            out,
            "  {:<10} {:>5.1}  ({})",
            category.label(),
            score,
            ScoreBand::of(score).label()
        )?;
    }

    heading(&mut out, "Top Startups")?;
    if summary.top_by_overall_score.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for (rank, record) in summary.top_by_overall_score.iter().enumerate() {
        writeln!(out, "  {}. {}", rank + 1, startup_line(record))?;
    }

    if !state.warnings.is_empty() {
        heading(&mut out, "Warnings")?;
        for warning in &state.warnings {
            writeln!(out, "  - {warning}")?;
        }
    }

    Ok(())
}

/// Render the report into a string.
pub fn render_to_string(state: &DashboardState) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = render(state, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

fn heading<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))
}

fn startup_line(record: &StartupRecord) -> String {
    let overall = match record.score(ScoreCategory::Overall) {
        Some(score) => format!("{score:.1}"),
        None => "-".to_string(),
    };
    format!(
        "{} | {} | {} | overall {}",
        record.name, record.industry, record.valuation, overall
    )
}

fn describe_criteria(criteria: &FilterCriteria) -> Vec<String> {
    if criteria.is_empty() {
        return vec!["(none)".to_string()];
    }
    vec![
        format!(
            "Industry:   {}",
            criteria.industry.as_deref().unwrap_or(constants::ALL_LABEL)
        ),
        format!("Valuation:  {}", criteria.valuation_bucket),
        format!(
            "Tech stack: {}",
            criteria.tech_stack_term.as_deref().unwrap_or(constants::ALL_LABEL)
        ),
        format!(
            "Search:     {}",
            if criteria.text_search.is_empty() {
                "-"
            } else {
                criteria.text_search.as_str()
            }
        ),
    ]
}
