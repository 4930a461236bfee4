// StartupLens - core/parser.rs
//
// Lenient extraction of startup records from free-text analysis output.
// Core layer: accepts &str, never touches the filesystem or network.
//
// Input shape: one record per blank-line-delimited segment. The first
// non-empty line names the startup; the rest is free text that may contain
// `Industry: ...`, `Tech Stack: ...` and `Valuation: $<n>B|M` fragments.
// The text is model-generated, so every field is optional and a miss falls
// back to a default rather than an error.

use crate::core::model::{StartupRecord, Valuation, ValuationUnit};
use crate::util::constants;
use regex::Regex;
use std::sync::OnceLock;

/// Compiled field extraction patterns, shared by every parse call.
struct FieldPatterns {
    industry: Regex,
    tech_stack: Regex,
    valuation: Regex,
}

fn patterns() -> &'static FieldPatterns {
    static PATTERNS: OnceLock<FieldPatterns> = OnceLock::new();

    PATTERNS.get_or_init(|| {
        fn re(pat: &str) -> Regex {
            Regex::new(pat).expect("parser: invalid field regex")
        }

        FieldPatterns {
            industry: re(r"Industry:\s*([^.]+)"),
            tech_stack: re(r"Tech Stack:\s*([^.]+)"),
            valuation: re(r"Valuation:\s*\$([0-9.]+)([BM])"),
        }
    })
}

/// Parse a raw text blob into startup records.
///
/// Equivalent to [`parse_with_limit`] with `constants::MAX_RECORDS`.
pub fn parse(raw: &str) -> Vec<StartupRecord> {
    parse_with_limit(raw, constants::MAX_RECORDS)
}

/// Parse a raw text blob, producing at most `max_records` records.
///
/// Segments are separated by a blank line (`\n\n`; `\r\n` endings are
/// normalised first). Segments with no non-empty line are skipped. Output
/// order follows input order and the function is pure: identical input
/// always yields identical output.
pub fn parse_with_limit(raw: &str, max_records: usize) -> Vec<StartupRecord> {
    let normalised;
    let text = if raw.contains('\r') {
        normalised = raw.replace("\r\n", "\n");
        normalised.as_str()
    } else {
        raw
    };

    let mut records = Vec::new();
    let mut skipped: usize = 0;
    let mut truncated: usize = 0;

    for segment in text.split("\n\n") {
        match parse_segment(segment) {
            Some(_) if records.len() >= max_records => truncated += 1,
            Some(record) => records.push(record),
            None => skipped += 1,
        }
    }

    if truncated > 0 {
        tracing::warn!(
            kept = records.len(),
            dropped = truncated,
            max = max_records,
            "Record limit reached; remaining segments ignored"
        );
    }

    tracing::debug!(
        records = records.len(),
        empty_segments = skipped,
        bytes = raw.len(),
        "Parsed startup records"
    );

    records
}

/// Parse a single segment. Returns `None` when the segment has no
/// non-empty line to use as a name.
pub fn parse_segment(segment: &str) -> Option<StartupRecord> {
    // Whitespace-only leading lines are skipped, not treated as the name, so
    // "\n   \nB" names its record "B" instead of dropping it.
    let mut lines = segment.lines().skip_while(|line| line.trim().is_empty());
    let name = lines.next()?.trim().to_string();
    let description = lines.collect::<Vec<_>>().join("\n");

    Some(StartupRecord {
        name,
        industry: extract_industry(&description),
        tech_stack: extract_tech_stack(&description),
        valuation: extract_valuation(&description),
        description,
        scores: None,
    })
}

/// `Industry: <text up to the next period>`, trimmed; `"Unknown"` on a miss.
pub fn extract_industry(description: &str) -> String {
    patterns()
        .industry
        .captures(description)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .unwrap_or(constants::UNKNOWN_INDUSTRY)
        .to_string()
}

/// `Tech Stack: a, b, c` up to the next period, split on commas.
pub fn extract_tech_stack(description: &str) -> Vec<String> {
    let Some(list) = patterns()
        .tech_stack
        .captures(description)
        .and_then(|caps| caps.get(1))
    else {
        return Vec::new();
    };

    list.as_str()
        .split(',')
        .map(str::trim)
        .filter(|tech| !tech.is_empty())
        .map(str::to_string)
        .collect()
}

/// `Valuation: $<number>B` or `$<number>M`; `Unknown` on a miss or when
/// the captured digits do not form a number (e.g. `$..B`).
pub fn extract_valuation(description: &str) -> Valuation {
    let Some(caps) = patterns().valuation.captures(description) else {
        return Valuation::Unknown;
    };

    let unit = caps
        .get(2)
        .and_then(|m| m.as_str().chars().next())
        .and_then(ValuationUnit::from_suffix);

    match (caps.get(1), unit) {
        (Some(amount), Some(unit)) => Valuation::from_parts(amount.as_str(), unit),
        _ => Valuation::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_content() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n\n\n").is_empty());
        assert!(parse("   \n  \n\n\t").is_empty());
    }

    #[test]
    fn test_parse_all_fields() {
        let records = parse("Acme\nIndustry: AI/ML. Tech Stack: Python, Go. Valuation: $1.2B.");
        assert_eq!(records.len(), 1);

        let acme = &records[0];
        assert_eq!(acme.name, "Acme");
        assert_eq!(acme.industry, "AI/ML");
        assert_eq!(acme.tech_stack, vec!["Python", "Go"]);
        assert_eq!(acme.valuation.to_string(), "$1.2B");
        assert_eq!(acme.valuation.millions(), Some(1200.0));
        assert_eq!(
            acme.description,
            "Industry: AI/ML. Tech Stack: Python, Go. Valuation: $1.2B."
        );
        assert!(acme.scores.is_none());
    }

    #[test]
    fn test_parse_missing_fields_use_defaults() {
        let records = parse("A\nno fields here\n\nB\nIndustry: Fintech.");
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].name, "A");
        assert_eq!(records[0].industry, "Unknown");
        assert!(records[0].tech_stack.is_empty());
        assert_eq!(records[0].valuation, Valuation::Unknown);
        assert_eq!(records[0].valuation.to_string(), "Unknown");

        assert_eq!(records[1].name, "B");
        assert_eq!(records[1].industry, "Fintech");
    }

    #[test]
    fn test_parse_is_deterministic() {
        let raw = "Acme\nIndustry: AI/ML.\n\nBeta\nValuation: $40M.";
        assert_eq!(parse(raw), parse(raw));
    }

    #[test]
    fn test_parse_multiline_description() {
        let records = parse("  Acme Robotics  \nBuilds robots.\nIndustry: Robotics.\nValuation: $300M");
        assert_eq!(records[0].name, "Acme Robotics");
        assert_eq!(
            records[0].description,
            "Builds robots.\nIndustry: Robotics.\nValuation: $300M"
        );
        assert_eq!(records[0].industry, "Robotics");
        assert_eq!(records[0].valuation.millions(), Some(300.0));
    }

    #[test]
    fn test_parse_extra_blank_lines_keep_name() {
        // Three newlines leave a leading '\n' on the second segment.
        let records = parse("A\nIndustry: Fintech.\n\n\nB\nIndustry: EdTech.\n\n");
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(records[1].industry, "EdTech");
    }

    #[test]
    fn test_parse_whitespace_only_leading_line_is_skipped() {
        let records = parse("A\n\n   \nB\nIndustry: X.");
        let fields: Vec<_> = records
            .iter()
            .map(|r| (r.name.as_str(), r.industry.as_str()))
            .collect();
        assert_eq!(fields, vec![("A", "Unknown"), ("B", "X")]);
    }

    #[test]
    fn test_parse_crlf_line_endings() {
        let records = parse("A\r\nIndustry: Fintech.\r\n\r\nB\r\nValuation: $2B.");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].industry, "Fintech");
        assert_eq!(records[1].valuation.to_string(), "$2B");
    }

    #[test]
    fn test_parse_with_limit_truncates() {
        let raw = "A\n\nB\n\nC\n\nD";
        let records = parse_with_limit(raw, 2);
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_extract_tech_stack_drops_empty_entries() {
        assert_eq!(
            extract_tech_stack("Tech Stack: , Rust,, Go ,"),
            vec!["Rust", "Go"]
        );
        assert!(extract_tech_stack("Tech Stack: .").is_empty());
        assert!(extract_tech_stack("no stack").is_empty());
    }

    #[test]
    fn test_extract_industry_whitespace_only_is_unknown() {
        assert_eq!(extract_industry("Industry:   . Other"), "Unknown");
    }

    #[test]
    fn test_extract_valuation_requires_unit() {
        assert_eq!(extract_valuation("Valuation: $500K."), Valuation::Unknown);
        assert_eq!(extract_valuation("Valuation: 500M."), Valuation::Unknown);
        assert_eq!(extract_valuation("Valuation: $..B"), Valuation::Unknown);
        assert_eq!(
            extract_valuation("Valuation:$750M").millions(),
            Some(750.0)
        );
    }

    #[test]
    fn test_parse_segment_without_name() {
        assert!(parse_segment("").is_none());
        assert!(parse_segment("  \n \t ").is_none());
    }
}
