// StartupLens - platform/config.rs
//
// Platform-specific configuration directory resolution and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::aggregate::AggregateConfig;
use crate::core::envelope::InputFormat;
use crate::core::filter::{FilterCriteria, ValuationBucket};
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for StartupLens configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/startuplens/ or %APPDATA%\StartupLens\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility -- a newer
/// config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[filter]` section.
    pub filter: FilterSection,
    /// `[aggregate]` section.
    pub aggregate: AggregateSection,
    /// `[input]` section.
    pub input: InputSection,
    /// `[scoring]` section.
    pub scoring: ScoringSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[filter]` config section: default criteria when no CLI flag overrides.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct FilterSection {
    pub industry: Option<String>,
    pub valuation_bucket: Option<String>,
    pub tech_stack: Option<String>,
}

/// `[aggregate]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct AggregateSection {
    /// Industries listed in the summary.
    pub top_industries: Option<usize>,
    /// Startups listed in the overall-score ranking.
    pub top_startups: Option<usize>,
}

/// `[input]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct InputSection {
    /// Maximum size of one input in bytes.
    pub max_input_bytes: Option<u64>,
    /// "auto", "text" or "envelope".
    pub format: Option<String>,
}

/// `[scoring]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ScoringSection {
    /// Attach placeholder scores to parsed records.
    pub placeholder: Option<bool>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
    /// Log file path (empty = stderr only).
    pub file: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Default filter criteria.
    pub filter: FilterCriteria,
    /// Ranked list limits.
    pub aggregate: AggregateConfig,
    /// Maximum size of a single input in bytes.
    pub max_input_bytes: u64,
    /// How inputs are interpreted.
    pub input_format: InputFormat,
    /// Whether placeholder scores are attached.
    pub placeholder_scores: bool,
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
    /// Log file path.
    pub log_file: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            filter: FilterCriteria::default(),
            aggregate: AggregateConfig::default(),
            max_input_bytes: constants::DEFAULT_MAX_INPUT_BYTES,
            input_format: InputFormat::Auto,
            placeholder_scores: true,
            log_level: None,
            log_file: None,
        }
    }
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first-run).
/// If the file is unreadable or unparseable, returns defaults with a warning
/// so the run still proceeds but the user is informed.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), Vec::new());
    }

    match load_config_file(&config_path) {
        Ok(loaded) => loaded,
        Err(e) => {
            let msg = format!("{e}. Using defaults.");
            tracing::warn!("{}", msg);
            (AppConfig::default(), vec![msg])
        }
    }
}

/// Load and validate an explicitly named config file.
///
/// Unlike [`load_config`], a missing or malformed file is an error: the user
/// asked for this file, so silently ignoring it would hide a mistake.
pub fn load_config_file(path: &Path) -> Result<(AppConfig, Vec<String>), ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let raw: RawConfig = toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(path = %path.display(), "Loaded config.toml");

    Ok(validate(raw))
}

fn out_of_range(field: &str, value: impl ToString, expected: impl Into<String>) -> String {
    ConfigError::ValueOutOfRange {
        field: field.to_string(),
        value: value.to_string(),
        expected: expected.into(),
    }
    .to_string()
}

/// Validate each field, accumulating all problems as warnings.
pub fn validate(raw: RawConfig) -> (AppConfig, Vec<String>) {
    let mut config = AppConfig::default();
    let mut warnings: Vec<String> = Vec::new();

    // -- Filter --
    if let Some(industry) = raw.filter.industry {
        let industry = industry.trim();
        if !industry.is_empty() && industry != constants::ALL_LABEL {
            config.filter.industry = Some(industry.to_string());
        }
    }
    if let Some(ref label) = raw.filter.valuation_bucket {
        match label.parse::<ValuationBucket>() {
            Ok(bucket) => config.filter.valuation_bucket = bucket,
            Err(e) => warnings.push(format!("[filter] valuation_bucket: {e}. Using default (All).")),
        }
    }
    if let Some(tech) = raw.filter.tech_stack {
        let tech = tech.trim();
        if !tech.is_empty() && tech != constants::ALL_LABEL {
            config.filter.tech_stack_term = Some(tech.to_string());
        }
    }

    // -- Aggregate --
    if let Some(n) = raw.aggregate.top_industries {
        if (1..=constants::ABSOLUTE_MAX_TOP_N).contains(&n) {
            config.aggregate.top_industries = n;
        } else {
            warnings.push(out_of_range(
                "[aggregate] top_industries",
                n,
                format!(
                    "1-{}; using default ({})",
                    constants::ABSOLUTE_MAX_TOP_N,
                    constants::DEFAULT_TOP_INDUSTRIES
                ),
            ));
        }
    }
    if let Some(n) = raw.aggregate.top_startups {
        if (1..=constants::ABSOLUTE_MAX_TOP_N).contains(&n) {
            config.aggregate.top_startups = n;
        } else {
            warnings.push(out_of_range(
                "[aggregate] top_startups",
                n,
                format!(
                    "1-{}; using default ({})",
                    constants::ABSOLUTE_MAX_TOP_N,
                    constants::DEFAULT_TOP_STARTUPS
                ),
            ));
        }
    }

    // -- Input --
    if let Some(bytes) = raw.input.max_input_bytes {
        if (constants::MIN_MAX_INPUT_BYTES..=constants::ABSOLUTE_MAX_INPUT_BYTES).contains(&bytes) {
            config.max_input_bytes = bytes;
        } else {
            warnings.push(out_of_range(
                "[input] max_input_bytes",
                bytes,
                format!(
                    "{}-{}; using default ({})",
                    constants::MIN_MAX_INPUT_BYTES,
                    constants::ABSOLUTE_MAX_INPUT_BYTES,
                    constants::DEFAULT_MAX_INPUT_BYTES
                ),
            ));
        }
    }
    if let Some(ref format) = raw.input.format {
        match InputFormat::from_label(format) {
            Some(f) => config.input_format = f,
            None => warnings.push(format!(
                "[input] format = \"{format}\" is not recognised. \
                 Expected \"auto\", \"text\" or \"envelope\". Using default (auto).",
            )),
        }
    }

    // -- Scoring --
    if let Some(placeholder) = raw.scoring.placeholder {
        config.placeholder_scores = placeholder;
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.clone());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    // -- Logging: file --
    if let Some(ref file) = raw.logging.file {
        if !file.is_empty() {
            config.log_file = Some(file.clone());
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(count = warnings.len(), "Config validation produced warnings");
    }

    (config, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn validate_str(toml_text: &str) -> (AppConfig, Vec<String>) {
        let raw: RawConfig = toml::from_str(toml_text).unwrap();
        validate(raw)
    }

    #[test]
    fn test_empty_config_is_default() {
        let (config, warnings) = validate_str("");
        assert!(warnings.is_empty());
        assert!(config.filter.is_empty());
        assert_eq!(config.aggregate, AggregateConfig::default());
        assert_eq!(config.max_input_bytes, constants::DEFAULT_MAX_INPUT_BYTES);
        assert!(config.placeholder_scores);
    }

    #[test]
    fn test_full_config_applies_values() {
        let (config, warnings) = validate_str(
            r#"
            [filter]
            industry = "Fintech"
            valuation_bucket = "$100M - $500M"
            tech_stack = "All"

            [aggregate]
            top_industries = 5
            top_startups = 10

            [input]
            max_input_bytes = 4096
            format = "envelope"

            [scoring]
            placeholder = false

            [logging]
            level = "debug"
            file = "/tmp/startuplens.log"
            "#,
        );
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(config.filter.industry.as_deref(), Some("Fintech"));
        assert_eq!(config.filter.valuation_bucket, ValuationBucket::From100MTo500M);
        assert_eq!(config.filter.tech_stack_term, None);
        assert_eq!(config.aggregate.top_industries, 5);
        assert_eq!(config.aggregate.top_startups, 10);
        assert_eq!(config.max_input_bytes, 4096);
        assert_eq!(config.input_format, InputFormat::Envelope);
        assert!(!config.placeholder_scores);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.log_file.as_deref(), Some("/tmp/startuplens.log"));
    }

    #[test]
    fn test_invalid_values_warn_and_fall_back() {
        let (config, warnings) = validate_str(
            r#"
            [filter]
            valuation_bucket = "enormous"
            [aggregate]
            top_startups = 0
            [input]
            max_input_bytes = 1
            format = "xml"
            [logging]
            level = "loud"
            "#,
        );
        assert_eq!(warnings.len(), 5, "{warnings:?}");
        assert_eq!(config.filter.valuation_bucket, ValuationBucket::All);
        assert_eq!(config.aggregate.top_startups, constants::DEFAULT_TOP_STARTUPS);
        assert_eq!(config.max_input_bytes, constants::DEFAULT_MAX_INPUT_BYTES);
        assert_eq!(config.input_format, InputFormat::Auto);
        assert!(config.log_level.is_none());
        assert!(warnings.iter().any(|w| w.contains("top_startups")));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let (_, warnings) = validate_str("[future]\nshiny = true\n[filter]\ncolour = \"red\"\n");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_load_config_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let (config, warnings) = load_config(dir.path());
        assert!(warnings.is_empty());
        assert!(config.filter.is_empty());
    }

    #[test]
    fn test_load_config_malformed_file_warns() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(constants::CONFIG_FILE_NAME), "[filter\nindustry=").unwrap();
        let (config, warnings) = load_config(dir.path());
        assert_eq!(warnings.len(), 1);
        assert!(config.filter.is_empty());
    }

    #[test]
    fn test_load_config_file_errors_are_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(load_config_file(&missing), Err(ConfigError::Io { .. })));

        let bad = dir.path().join("bad.toml");
        fs::write(&bad, "top = [").unwrap();
        assert!(matches!(load_config_file(&bad), Err(ConfigError::TomlParse { .. })));
    }
}
