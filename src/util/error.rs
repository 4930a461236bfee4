// StartupLens - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// The pure core (parser, filter, aggregate) never produces errors; these
// types cover everything around it: reading inputs, decoding the API
// envelope, resolving filter labels, exporting, and configuration.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all StartupLens operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum StartupLensError {
    /// Reading an input failed.
    Input(InputError),

    /// Filter criteria could not be built.
    Filter(FilterError),

    /// Export operation failed.
    Export(ExportError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for StartupLensError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input(e) => write!(f, "Input error: {e}"),
            Self::Filter(e) => write!(f, "Filter error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for StartupLensError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Input(e) => Some(e),
            Self::Filter(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Input errors
// ---------------------------------------------------------------------------

/// Errors related to reading raw inputs (files or stdin).
#[derive(Debug)]
pub enum InputError {
    /// The input could not be read.
    Io { input: String, source: io::Error },

    /// The input exceeds the configured maximum size.
    TooLarge {
        input: String,
        size: u64,
        max_size: u64,
    },

    /// The input was read but its envelope could not be decoded.
    Envelope {
        input: String,
        source: EnvelopeError,
    },

    /// Every input failed; there is nothing to analyse.
    NothingLoaded { attempted: usize },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { input, source } => write!(f, "Cannot read '{input}': {source}"),
            Self::TooLarge {
                input,
                size,
                max_size,
            } => write!(
                f,
                "Input '{input}' is {size} bytes, exceeds maximum of {max_size} bytes. \
                 Increase [input] max_input_bytes in config."
            ),
            Self::Envelope { input, source } => write!(f, "'{input}': {source}"),
            Self::NothingLoaded { attempted } => {
                write!(f, "None of the {attempted} input(s) could be loaded")
            }
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Envelope { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<InputError> for StartupLensError {
    fn from(e: InputError) -> Self {
        Self::Input(e)
    }
}

// ---------------------------------------------------------------------------
// Envelope errors
// ---------------------------------------------------------------------------

/// Errors decoding the `[{ "results": ..., "synthetic": ... }]` envelope.
#[derive(Debug)]
pub enum EnvelopeError {
    /// The payload is not valid JSON of the expected shape.
    Json { source: serde_json::Error },

    /// The envelope array contained no result blocks.
    Empty,
}

impl fmt::Display for EnvelopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json { source } => write!(f, "invalid results envelope: {source}"),
            Self::Empty => write!(f, "results envelope contains no result blocks"),
        }
    }
}

impl std::error::Error for EnvelopeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json { source } => Some(source),
            Self::Empty => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Filter errors
// ---------------------------------------------------------------------------

/// Errors related to building filter criteria.
#[derive(Debug)]
pub enum FilterError {
    /// A valuation bucket label did not match any known bucket.
    UnknownBucket { label: String },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownBucket { label } => write!(
                f,
                "Unknown valuation bucket '{label}'. \
                 Expected one of: All, <100M, 100M-500M, 500M-1B, >1B"
            ),
        }
    }
}

impl std::error::Error for FilterError {}

impl From<FilterError> for StartupLensError {
    fn from(e: FilterError) -> Self {
        Self::Filter(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Export would exceed maximum record count.
    TooManyRecords { count: usize, max: usize },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
            Self::TooManyRecords { count, max } => write!(
                f,
                "Export of {count} records exceeds maximum of {max}. \
                 Apply filters to reduce the result set."
            ),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ExportError> for StartupLensError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for StartupLensError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for StartupLens results.
pub type Result<T> = std::result::Result<T, StartupLensError>;
