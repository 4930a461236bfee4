// StartupLens - core/envelope.rs
//
// Decoding of the analysis API's search/list response envelope:
//
//   [ { "results": "<free text>", "synthetic": true }, ... ]
//
// `synthetic` marks placeholder text generated when no real data was
// available. The parser treats both kinds identically; the flag is only
// carried through for logging and reporting.

use crate::util::error::EnvelopeError;
use serde::{Deserialize, Serialize};

/// One element of the response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultBlock {
    /// Free-text records, blank-line delimited.
    pub results: String,

    /// Whether the text is synthetic placeholder data.
    #[serde(default)]
    pub synthetic: bool,
}

/// How an input payload should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFormat {
    /// Envelope if the payload starts with `[`, raw text otherwise.
    #[default]
    Auto,
    /// Raw blank-line-delimited text.
    Text,
    /// JSON response envelope.
    Envelope,
}

impl InputFormat {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "text" => Some(Self::Text),
            "envelope" | "json" => Some(Self::Envelope),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Text => "text",
            Self::Envelope => "envelope",
        }
    }
}

/// Text ready for the parser, plus whether it came from a synthetic block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub text: String,
    pub synthetic: bool,
}

/// Turn an input payload into parser text according to `format`.
///
/// Envelope payloads yield their first result block.
pub fn decode_payload(payload: String, format: InputFormat) -> Result<Payload, EnvelopeError> {
    let is_envelope = match format {
        InputFormat::Auto => looks_like_envelope(&payload),
        InputFormat::Text => false,
        InputFormat::Envelope => true,
    };

    if !is_envelope {
        return Ok(Payload {
            text: payload,
            synthetic: false,
        });
    }

    let block = first_results(&payload)?;
    if block.synthetic {
        tracing::info!("Results envelope contains synthetic data");
    }
    Ok(Payload {
        text: block.results,
        synthetic: block.synthetic,
    })
}

/// Decode every result block in the envelope.
pub fn parse_envelope(json: &str) -> Result<Vec<ResultBlock>, EnvelopeError> {
    let blocks: Vec<ResultBlock> =
        serde_json::from_str(json).map_err(|source| EnvelopeError::Json { source })?;

    tracing::debug!(
        blocks = blocks.len(),
        synthetic = blocks.iter().filter(|b| b.synthetic).count(),
        "Decoded results envelope"
    );

    Ok(blocks)
}

/// The first block of the envelope, which is what the dashboard reads.
pub fn first_results(json: &str) -> Result<ResultBlock, EnvelopeError> {
    parse_envelope(json)?
        .into_iter()
        .next()
        .ok_or(EnvelopeError::Empty)
}

/// Whether a payload looks like a JSON envelope rather than raw text.
pub fn looks_like_envelope(payload: &str) -> bool {
    payload.trim_start().starts_with('[')
}
