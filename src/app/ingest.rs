// StartupLens - app/ingest.rs
//
// Input ingestion: read every input, decode envelopes, parse, attach scores.
//
// Inputs are independent, so they are read and parsed on the rayon pool.
// `par_iter().collect()` keeps input order, so the combined collection is
// identical to a sequential run. A failing input becomes a warning; the
// run only fails when nothing at all could be loaded.

use crate::core::envelope::{self, InputFormat};
use crate::core::model::StartupRecord;
use crate::core::parser;
use crate::core::score::{self, ScoreProvider};
use crate::platform::fs::{self, InputSource};
use crate::util::constants;
use crate::util::error::InputError;
use crate::util::logging;
use rayon::prelude::*;

/// Settings for one ingestion run.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    pub format: InputFormat,
    pub max_input_bytes: u64,
    /// Cap on records across all inputs combined.
    pub max_records: usize,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            format: InputFormat::Auto,
            max_input_bytes: constants::DEFAULT_MAX_INPUT_BYTES,
            max_records: constants::MAX_RECORDS,
        }
    }
}

/// Per-input result summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedInput {
    pub source: InputSource,
    pub records: usize,
    pub synthetic: bool,
}

/// Result of an ingestion run.
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    /// All records, in input order then segment order, with scores attached.
    pub records: Vec<StartupRecord>,
    /// Inputs that loaded successfully.
    pub inputs: Vec<LoadedInput>,
    /// Non-fatal problems (failed inputs, truncation).
    pub warnings: Vec<String>,
}

/// Load, parse and score every input.
///
/// Returns `InputError::NothingLoaded` only when every input failed.
pub fn load_inputs(
    sources: &[InputSource],
    options: &IngestOptions,
    scorer: &dyn ScoreProvider,
) -> Result<IngestOutcome, InputError> {
    tracing::info!(
        inputs = sources.len(),
        format = options.format.label(),
        scorer = scorer.name(),
        "Ingestion started"
    );

    let results: Vec<Result<(Vec<StartupRecord>, bool), InputError>> = sources
        .par_iter()
        .map(|source| load_one(source, options))
        .collect();

    let mut records = Vec::new();
    let mut inputs = Vec::new();
    let mut warnings = Vec::new();

    for (source, result) in sources.iter().zip(results) {
        match result {
            Ok((parsed, synthetic)) => {
                inputs.push(LoadedInput {
                    source: source.clone(),
                    records: parsed.len(),
                    synthetic,
                });
                records.extend(parsed);
            }
            Err(e) => {
                tracing::warn!(input = %source, error = %e, "Input skipped");
                if warnings.len() < constants::MAX_WARNINGS {
                    warnings.push(e.to_string());
                }
            }
        }
    }

    if inputs.is_empty() && !sources.is_empty() {
        return Err(InputError::NothingLoaded {
            attempted: sources.len(),
        });
    }

    if records.len() > options.max_records {
        let msg = format!(
            "Loaded {} records; keeping the first {} (record limit)",
            records.len(),
            options.max_records
        );
        tracing::warn!("{}", msg);
        warnings.push(msg);
        records.truncate(options.max_records);
    }

    let records = score::apply_scores(&records, scorer);

    tracing::info!(
        records = records.len(),
        loaded = inputs.len(),
        failed = sources.len() - inputs.len(),
        "Ingestion complete"
    );

    Ok(IngestOutcome {
        records,
        inputs,
        warnings,
    })
}

fn load_one(
    source: &InputSource,
    options: &IngestOptions,
) -> Result<(Vec<StartupRecord>, bool), InputError> {
    let raw = fs::read_input(source, options.max_input_bytes)?;
    tracing::debug!(input = %source, preview = %logging::preview(&raw), "Payload received");

    let payload = envelope::decode_payload(raw, options.format).map_err(|e| {
        InputError::Envelope {
            input: source.to_string(),
            source: e,
        }
    })?;

    let records = parser::parse_with_limit(&payload.text, options.max_records);
    Ok((records, payload.synthetic))
}
