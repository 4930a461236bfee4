// StartupLens - core/score.rs
//
// Score providers. The aggregator treats scores as an external input; this
// module is the seam where a real scoring service would plug in. Until one
// exists, `PlaceholderScorer` fills the dashboard with stable stand-in values.

use crate::core::model::{ScoreCategory, Scores, StartupRecord};
use crate::util::constants;

/// Supplies per-category scores for a record.
pub trait ScoreProvider: Send + Sync {
    /// Scores for `record`, or `None` if this provider has none for it.
    fn scores_for(&self, record: &StartupRecord) -> Option<Scores>;

    /// Short identifier for logging.
    fn name(&self) -> &'static str;
}

/// Provider that never scores anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoScores;

impl ScoreProvider for NoScores {
    fn scores_for(&self, _record: &StartupRecord) -> Option<Scores> {
        None
    }

    fn name(&self) -> &'static str {
        "none"
    }
}

/// Deterministic stand-in scores in `[60, 100)`.
///
/// Each category score is derived from an FNV-1a hash of the record name and
/// the category key, so the same startup always gets the same scores across
/// runs and platforms. These numbers carry no analytical meaning.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderScorer;

impl PlaceholderScorer {
    fn score(name: &str, category: ScoreCategory) -> f64 {
        let hash = fnv1a(&[name.as_bytes(), b"\0", category.key().as_bytes()]);
        // Top 53 bits -> uniform fraction in [0, 1).
        let fraction = (hash >> 11) as f64 / (1u64 << 53) as f64;
        constants::PLACEHOLDER_SCORE_MIN + fraction * constants::PLACEHOLDER_SCORE_SPAN
    }
}

impl ScoreProvider for PlaceholderScorer {
    fn scores_for(&self, record: &StartupRecord) -> Option<Scores> {
        Some(
            ScoreCategory::all()
                .iter()
                .map(|&category| (category, Self::score(&record.name, category)))
                .collect(),
        )
    }

    fn name(&self) -> &'static str {
        "placeholder"
    }
}

fn fnv1a(parts: &[&[u8]]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    parts
        .iter()
        .flat_map(|part| part.iter())
        .fold(OFFSET, |hash, &byte| (hash ^ u64::from(byte)).wrapping_mul(PRIME))
}

/// Return a new collection with scores from `provider` attached.
pub fn apply_scores(records: &[StartupRecord], provider: &dyn ScoreProvider) -> Vec<StartupRecord> {
    let scored: Vec<StartupRecord> = records
        .iter()
        .map(|record| record.with_scores(provider.scores_for(record)))
        .collect();

    tracing::debug!(
        provider = provider.name(),
        records = scored.len(),
        scored = scored.iter().filter(|r| r.scores.is_some()).count(),
        "Scores attached"
    );

    scored
}
