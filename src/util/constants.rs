// StartupLens - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "StartupLens";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "StartupLens";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Parsing
// =============================================================================

/// Value used for `industry` when a record has no `Industry:` field.
pub const UNKNOWN_INDUSTRY: &str = "Unknown";

/// Display value for a record whose valuation could not be extracted.
pub const UNKNOWN_VALUATION: &str = "Unknown";

/// Label that selects every value of a filter field.
pub const ALL_LABEL: &str = "All";

/// Hard upper bound on the number of records produced from one text blob.
///
/// Upstream text is model-generated; a runaway response must not turn into
/// an unbounded allocation. Records past the cap are dropped with a warning.
pub const MAX_RECORDS: usize = 10_000;

// =============================================================================
// Input limits
// =============================================================================

/// Default maximum size of a single input (file or stdin) in bytes.
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 16 * 1024 * 1024; // 16 MB

/// Minimum user-configurable input size limit.
pub const MIN_MAX_INPUT_BYTES: u64 = 1024; // 1 KB

/// Hard upper bound on the input size limit (prevents configuration mistakes).
pub const ABSOLUTE_MAX_INPUT_BYTES: u64 = 256 * 1024 * 1024; // 256 MB

/// Maximum number of non-fatal ingestion warnings kept per run.
pub const MAX_WARNINGS: usize = 1_000;

// =============================================================================
// Valuation buckets (values in millions, half-open ranges)
// =============================================================================

/// Upper bound (exclusive) of the smallest bucket.
pub const BUCKET_SMALL_MAX_MILLIONS: f64 = 100.0;

/// Upper bound (exclusive) of the `100M-500M` bucket.
pub const BUCKET_MID_MAX_MILLIONS: f64 = 500.0;

/// Upper bound (exclusive) of the `500M-1B` bucket; also the unicorn threshold.
pub const BUCKET_LARGE_MAX_MILLIONS: f64 = 1_000.0;

/// Millions per billion, used for `B` valuations and display formatting.
pub const MILLIONS_PER_BILLION: f64 = 1_000.0;

// =============================================================================
// Aggregation
// =============================================================================

/// Default number of industries listed in the summary.
pub const DEFAULT_TOP_INDUSTRIES: usize = 3;

/// Default number of startups listed in the top-by-overall-score ranking.
pub const DEFAULT_TOP_STARTUPS: usize = 6;

/// Hard upper bound on either configurable "top N" limit.
pub const ABSOLUTE_MAX_TOP_N: usize = 100;

// =============================================================================
// Scoring
// =============================================================================

/// Lowest placeholder score (inclusive).
pub const PLACEHOLDER_SCORE_MIN: f64 = 60.0;

/// Width of the placeholder score range; scores fall in `[MIN, MIN + SPAN)`.
pub const PLACEHOLDER_SCORE_SPAN: f64 = 40.0;

/// Scores at or above this are reported as strong.
pub const SCORE_BAND_STRONG: f64 = 80.0;

/// Scores at or above this (and below strong) are reported as moderate.
pub const SCORE_BAND_MODERATE: f64 = 60.0;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Maximum number of characters of raw input included in debug output.
pub const DEBUG_MAX_TEXT_PREVIEW: usize = 200;

// =============================================================================
// Export
// =============================================================================

/// Maximum number of records that can be exported in a single operation.
pub const MAX_EXPORT_RECORDS: usize = 1_000_000;

/// Separator used when flattening a tech stack into one CSV cell.
pub const CSV_TECH_STACK_SEPARATOR: &str = "; ";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
