// StartupLens - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no
// platform dependencies.
//
// These types are the shared vocabulary across all layers.

use crate::util::constants;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// Startup record (normalised output of parsing)
// =============================================================================

/// A single startup entity extracted from one blank-line-delimited segment
/// of the analysis API's free-text response.
///
/// Records are immutable once parsed: filtering and scoring produce new
/// collections rather than editing records in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartupRecord {
    /// First non-empty line of the segment, trimmed. Never empty.
    pub name: String,

    /// Remaining lines of the segment joined by `\n`.
    pub description: String,

    /// Value of the `Industry:` field, or `"Unknown"`.
    pub industry: String,

    /// Entries of the `Tech Stack:` field, trimmed and non-empty.
    pub tech_stack: Vec<String>,

    /// Parsed `Valuation:` field.
    pub valuation: Valuation,

    /// Per-category scores supplied by a `ScoreProvider`.
    /// `None` means the record has no scores at all.
    pub scores: Option<Scores>,
}

impl StartupRecord {
    /// Score for one category, if the record has one.
    pub fn score(&self, category: ScoreCategory) -> Option<f64> {
        self.scores.as_ref().and_then(|s| s.get(&category).copied())
    }

    /// Overall score used for ranking. Missing scores rank as zero.
    pub fn overall_score(&self) -> f64 {
        self.score(ScoreCategory::Overall).unwrap_or(0.0)
    }

    /// Returns a copy of this record carrying `scores`.
    pub fn with_scores(&self, scores: Option<Scores>) -> Self {
        Self {
            scores,
            ..self.clone()
        }
    }
}

// =============================================================================
// Valuation
// =============================================================================

/// Magnitude suffix of a valuation string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValuationUnit {
    /// `M` suffix.
    Millions,
    /// `B` suffix.
    Billions,
}

impl ValuationUnit {
    /// Parse the single-letter suffix used in valuation strings.
    pub fn from_suffix(suffix: char) -> Option<Self> {
        match suffix {
            'M' => Some(Self::Millions),
            'B' => Some(Self::Billions),
            _ => None,
        }
    }

    pub fn suffix(&self) -> char {
        match self {
            Self::Millions => 'M',
            Self::Billions => 'B',
        }
    }

    /// Factor that converts an amount in this unit to millions.
    pub fn to_millions(&self) -> f64 {
        match self {
            Self::Millions => 1.0,
            Self::Billions => constants::MILLIONS_PER_BILLION,
        }
    }
}

/// A startup valuation as it appears in the source text.
///
/// Displays (and serialises) as `$<amount><unit>` or `Unknown`. The amount
/// keeps the digits exactly as written so `$1.20B` round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Valuation {
    Known {
        amount: String,
        unit: ValuationUnit,
    },
    #[default]
    Unknown,
}

impl Valuation {
    /// Build a known valuation from its digit string and unit.
    ///
    /// Returns `Unknown` when `amount` is not a finite decimal number, so a
    /// `Known` value always converts to millions.
    pub fn from_parts(amount: &str, unit: ValuationUnit) -> Self {
        match amount.parse::<f64>() {
            Ok(v) if v.is_finite() => Self::Known {
                amount: amount.to_string(),
                unit,
            },
            _ => Self::Unknown,
        }
    }

    /// Parse the display form (`$1.2B`, `$300M`, `Unknown`).
    pub fn parse_display(s: &str) -> Option<Self> {
        let s = s.trim();
        if s == constants::UNKNOWN_VALUATION {
            return Some(Self::Unknown);
        }
        let body = s.strip_prefix('$')?;
        let suffix = body.chars().last()?;
        let unit = ValuationUnit::from_suffix(suffix)?;
        let amount = &body[..body.len() - suffix.len_utf8()];
        match Self::from_parts(amount, unit) {
            Self::Unknown => None,
            known => Some(known),
        }
    }

    /// Value in millions; `None` for `Unknown`.
    pub fn millions(&self) -> Option<f64> {
        match self {
            Self::Known { amount, unit } => amount
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(|v| v * unit.to_millions()),
            Self::Unknown => None,
        }
    }
}

impl fmt::Display for Valuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known { amount, unit } => write!(f, "${amount}{}", unit.suffix()),
            Self::Unknown => f.write_str(constants::UNKNOWN_VALUATION),
        }
    }
}

impl Serialize for Valuation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Valuation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse_display(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "invalid valuation '{raw}', expected $<number>B, $<number>M or Unknown"
            ))
        })
    }
}

// =============================================================================
// Scores
// =============================================================================

/// Analysis categories a startup is scored on, in display order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ScoreCategory {
    Market,
    Team,
    Tech,
    Traction,
    Overall,
}

impl ScoreCategory {
    /// Returns all variants in display order.
    pub fn all() -> &'static [ScoreCategory] {
        &[
            ScoreCategory::Market,
            ScoreCategory::Team,
            ScoreCategory::Tech,
            ScoreCategory::Traction,
            ScoreCategory::Overall,
        ]
    }

    /// Lowercase key, as used in serialised output.
    pub fn key(&self) -> &'static str {
        match self {
            ScoreCategory::Market => "market",
            ScoreCategory::Team => "team",
            ScoreCategory::Tech => "tech",
            ScoreCategory::Traction => "traction",
            ScoreCategory::Overall => "overall",
        }
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            ScoreCategory::Market => "Market",
            ScoreCategory::Team => "Team",
            ScoreCategory::Tech => "Tech",
            ScoreCategory::Traction => "Traction",
            ScoreCategory::Overall => "Overall",
        }
    }
}

impl fmt::Display for ScoreCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-category scores in `[0, 100]`.
pub type Scores = BTreeMap<ScoreCategory, f64>;

/// Qualitative band of a score, used when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Strong,
    Moderate,
    Weak,
}

impl ScoreBand {
    pub fn of(score: f64) -> Self {
        if score >= constants::SCORE_BAND_STRONG {
            Self::Strong
        } else if score >= constants::SCORE_BAND_MODERATE {
            Self::Moderate
        } else {
            Self::Weak
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Moderate => "moderate",
            Self::Weak => "weak",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valuation_millions_conversion() {
        let b = Valuation::from_parts("1.2", ValuationUnit::Billions);
        let m = Valuation::from_parts("300", ValuationUnit::Millions);
        assert_eq!(b.millions(), Some(1200.0));
        assert_eq!(m.millions(), Some(300.0));
        assert_eq!(Valuation::Unknown.millions(), None);
    }

    #[test]
    fn test_valuation_display_keeps_original_digits() {
        let v = Valuation::from_parts("1.20", ValuationUnit::Billions);
        assert_eq!(v.to_string(), "$1.20B");
        assert_eq!(Valuation::Unknown.to_string(), "Unknown");
    }

    #[test]
    fn test_valuation_rejects_non_numeric_amount() {
        assert_eq!(
            Valuation::from_parts("1.2.3", ValuationUnit::Millions),
            Valuation::Unknown
        );
        assert_eq!(
            Valuation::from_parts(".", ValuationUnit::Billions),
            Valuation::Unknown
        );
    }

    #[test]
    fn test_valuation_parse_display() {
        assert_eq!(
            Valuation::parse_display("$300M"),
            Some(Valuation::from_parts("300", ValuationUnit::Millions))
        );
        assert_eq!(Valuation::parse_display("Unknown"), Some(Valuation::Unknown));
        assert_eq!(Valuation::parse_display("300M"), None);
        assert_eq!(Valuation::parse_display("$300K"), None);
        assert_eq!(Valuation::parse_display("$"), None);
    }

    #[test]
    fn test_valuation_serde_uses_display_form() {
        let v = Valuation::from_parts("2", ValuationUnit::Billions);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "\"$2B\"");
        let back: Valuation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
        assert!(serde_json::from_str::<Valuation>("\"lots\"").is_err());
    }

    #[test]
    fn test_score_band_thresholds() {
        assert_eq!(ScoreBand::of(80.0), ScoreBand::Strong);
        assert_eq!(ScoreBand::of(79.9), ScoreBand::Moderate);
        assert_eq!(ScoreBand::of(60.0), ScoreBand::Moderate);
        assert_eq!(ScoreBand::of(59.9), ScoreBand::Weak);
    }

    #[test]
    fn test_overall_score_defaults_to_zero() {
        let record = StartupRecord {
            name: "Acme".to_string(),
            description: String::new(),
            industry: "Unknown".to_string(),
            tech_stack: Vec::new(),
            valuation: Valuation::Unknown,
            scores: None,
        };
        assert_eq!(record.overall_score(), 0.0);

        let mut scores = Scores::new();
        scores.insert(ScoreCategory::Overall, 72.5);
        let scored = record.with_scores(Some(scores));
        assert_eq!(scored.overall_score(), 72.5);
        assert_eq!(scored.score(ScoreCategory::Team), None);
        assert!(record.scores.is_none(), "original record must be untouched");
    }
}
