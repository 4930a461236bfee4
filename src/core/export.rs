// StartupLens - core/export.rs
//
// CSV and JSON export of filtered startup records and analysis reports.
// Core layer: writes to any Write trait object.

use crate::core::aggregate::SummaryStats;
use crate::core::filter::FilterCriteria;
use crate::core::model::{ScoreCategory, StartupRecord};
use crate::util::constants;
use crate::util::error::ExportError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Everything needed to reproduce a dashboard view: the criteria, the
/// resulting statistics, and the filtered records.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub criteria: FilterCriteria,
    pub summary: SummaryStats,
    pub records: Vec<StartupRecord>,
}

impl AnalysisReport {
    /// Build a report stamped with the current time.
    pub fn new(criteria: FilterCriteria, summary: SummaryStats, records: Vec<StartupRecord>) -> Self {
        Self {
            generated_at: Utc::now(),
            criteria,
            summary,
            records,
        }
    }
}

fn check_limit(count: usize) -> Result<(), ExportError> {
    if count > constants::MAX_EXPORT_RECORDS {
        return Err(ExportError::TooManyRecords {
            count,
            max: constants::MAX_EXPORT_RECORDS,
        });
    }
    Ok(())
}

/// Export records to CSV format.
///
/// Writes: name, industry, valuation, valuation_millions, tech_stack, one
/// column per score category, description. Unknown values are empty cells.
pub fn export_csv<W: Write>(
    records: &[StartupRecord],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    check_limit(records.len())?;

    let csv_err = |e: csv::Error| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };

    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = vec!["name", "industry", "valuation", "valuation_millions", "tech_stack"];
    header.extend(ScoreCategory::all().iter().map(|c| c.key()));
    header.push("description");
    csv_writer.write_record(&header).map_err(csv_err)?;

    let mut count = 0;
    for record in records {
        let millions = record
            .valuation
            .millions()
            .map(|m| m.to_string())
            .unwrap_or_default();

        let mut row = vec![
            record.name.clone(),
            record.industry.clone(),
            record.valuation.to_string(),
            millions,
            record.tech_stack.join(constants::CSV_TECH_STACK_SEPARATOR),
        ];
        row.extend(ScoreCategory::all().iter().map(|&category| {
            record
                .score(category)
                .map(|s| format!("{s:.1}"))
                .unwrap_or_default()
        }));
        row.push(record.description.clone());

        csv_writer.write_record(&row).map_err(csv_err)?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    tracing::info!(path = %export_path.display(), records = count, "CSV export complete");
    Ok(count)
}

/// Export records to JSON format (array of objects).
pub fn export_json<W: Write>(
    records: &[StartupRecord],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    check_limit(records.len())?;
    serde_json::to_writer_pretty(writer, records).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    tracing::info!(path = %export_path.display(), records = records.len(), "JSON export complete");
    Ok(records.len())
}

/// Export a full analysis report as a JSON object.
pub fn export_report<W: Write>(
    report: &AnalysisReport,
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    check_limit(report.records.len())?;
    serde_json::to_writer_pretty(writer, report).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(report.records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aggregate::aggregate;
    use crate::core::parser::parse;
    use crate::core::score::{apply_scores, PlaceholderScorer};
    use std::path::PathBuf;

    fn sample() -> Vec<StartupRecord> {
        parse(
            "Acme\nIndustry: AI/ML. Tech Stack: Python, Go. Valuation: $1.2B.\n\n\
             Beta, Inc\nIndustry: Fintech. Said \"hello\".",
        )
    }

    #[test]
    fn test_csv_export() {
        let records = apply_scores(&sample(), &PlaceholderScorer);
        let mut buf = Vec::new();
        let count = export_csv(&records, &mut buf, &PathBuf::from("out.csv")).unwrap();
        assert_eq!(count, 2);

        let output = String::from_utf8(buf).unwrap();
        let mut lines = output.lines();
        assert_eq!(
            lines.next().unwrap(),
            "name,industry,valuation,valuation_millions,tech_stack,market,team,tech,traction,overall,description"
        );
        assert!(output.contains("Acme,AI/ML,$1.2B,1200,Python; Go,"));
        // Fields containing commas or quotes are quoted by the csv crate.
        assert!(output.contains("\"Beta, Inc\""));
    }

    #[test]
    fn test_csv_unknown_values_are_empty() {
        let records = parse("Lonely");
        let mut buf = Vec::new();
        export_csv(&records, &mut buf, &PathBuf::from("out.csv")).unwrap();
        let output = String::from_utf8(buf).unwrap();
        assert!(output.contains("Lonely,Unknown,Unknown,,,,,,,,"));
    }

    #[test]
    fn test_json_export() {
        let records = sample();
        let mut buf = Vec::new();
        let count = export_json(&records, &mut buf, &PathBuf::from("out.json")).unwrap();
        assert_eq!(count, 2);

        let back: Vec<StartupRecord> = serde_json::from_slice(&buf).unwrap();
        assert_eq!(back, records);
    }

    #[test]
    fn test_report_export() {
        let records = apply_scores(&sample(), &PlaceholderScorer);
        let report = AnalysisReport::new(FilterCriteria::default(), aggregate(&records), records);
        let mut buf = Vec::new();
        let count = export_report(&report, &mut buf, &PathBuf::from("report.json")).unwrap();
        assert_eq!(count, 2);

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["summary"]["total"], 2);
        assert_eq!(value["summary"]["average_valuation_millions"], 1200.0);
        assert!(value["summary"]["average_scores"]["overall"].is_number());
        assert_eq!(value["criteria"]["valuation_bucket"], "All");
        assert!(value["generated_at"].is_string());
    }
}
