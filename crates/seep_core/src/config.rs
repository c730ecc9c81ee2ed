use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Deserialize;

use crate::detector::Detector;
use crate::error::DetectorError;

/// Project-level configuration loaded from `.seep.toml`.
///
/// Controls the suppression gates, entropy tuning, and the detector roster.
/// All fields are optional and default to the built-in behaviour (no gates,
/// every built-in detector enabled).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Enable stopword suppression even without `--strict` on the command line.
    #[serde(default)]
    pub strict: bool,

    /// Enable entropy scoring even without `--entropy` on the command line.
    #[serde(default)]
    pub entropy: bool,

    /// Override for the base64 entropy cutoff, in bits.
    #[serde(default)]
    pub base64_cutoff: Option<u32>,

    /// Override for the hex entropy cutoff, in bits.
    #[serde(default)]
    pub hex_cutoff: Option<u32>,

    /// Regex locating the assignment operator during entropy scoring.
    #[serde(default)]
    pub assignment_pattern: Option<String>,

    /// Replacement alphabet for the base64 entropy score.
    #[serde(default)]
    pub base64_alphabet: Option<String>,

    /// Replacement alphabet for the hex entropy score.
    #[serde(default)]
    pub hex_alphabet: Option<String>,

    /// Replacement stopword list for strict mode. When absent the built-in
    /// list is used.
    #[serde(default)]
    pub stopwords: Option<Vec<String>>,

    /// Built-in detector names to disable (e.g. `"aws-access-key-id"`).
    #[serde(default)]
    pub disabled_detectors: Vec<String>,

    /// User-defined detectors, scanned alongside the built-ins.
    #[serde(default, rename = "detectors")]
    pub custom_detectors: Vec<CustomDetector>,

    /// Worker thread count for pair scanning.
    #[serde(default)]
    pub concurrency: Option<usize>,

    /// Maximum wall-clock run time in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// A user-defined detector declared in `.seep.toml`.
///
/// Custom detectors are compiled into [`Detector`] instances at startup and
/// participate in scanning alongside the built-in table.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomDetector {
    /// Unique name reported with each finding.
    pub name: String,
    /// Optional longer description. Falls back to `name` if absent.
    #[serde(default)]
    pub description: Option<String>,
    /// Regular expression tested against each diff line.
    pub regex: String,
    /// Aho-Corasick pre-filter keywords. If non-empty, the detector is only
    /// tested against lines that contain at least one keyword.
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl CustomDetector {
    /// Compiles this definition into a `Detector` ready for scanning.
    ///
    /// Returns `DetectorError::InvalidRegex` if the regex is malformed.
    pub fn compile(&self) -> Result<Detector, DetectorError> {
        let regex = Regex::new(&self.regex).map_err(|source| DetectorError::InvalidRegex {
            name: self.name.clone(),
            source,
        })?;

        Ok(Detector {
            name: self.name.as_str().into(),
            description: self.description.clone().unwrap_or_else(|| self.name.clone()).into(),
            regex,
            keywords: self.keywords.iter().map(|s| s.as_str().into()).collect(),
        })
    }
}

impl Config {
    /// Creates a default configuration with no overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a `.seep.toml` file.
    ///
    /// Returns the default configuration if the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = read_file(path)?;
        parse_toml(path, &content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })
    }

    /// Compiles all user-defined detectors into `Detector` instances.
    ///
    /// Fails on the first detector whose regex is invalid.
    pub fn compile_custom_detectors(&self) -> Result<Vec<Detector>, DetectorError> {
        self.custom_detectors.iter().map(CustomDetector::compile).collect()
    }

    /// Returns true if the named built-in detector has been disabled.
    #[must_use]
    pub fn is_disabled(&self, name: &str) -> bool {
        self.disabled_detectors.iter().any(|d| d == name)
    }
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_toml(path: &Path, content: &str) -> Result<Config, ConfigError> {
    toml::from_str(content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Errors that can occur when reading or parsing a `.seep.toml`
/// configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read from disk.
    #[error("failed to read config '{path}': {source}")]
    Read {
        /// Path to the config file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file contained invalid TOML or unexpected values.
    #[error("failed to parse config '{path}': {source}")]
    Parse {
        /// Path to the config file that could not be parsed.
        path: PathBuf,
        /// The underlying TOML deserialization error.
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    /// Returns the file path associated with this error.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn config_default_disables_both_gates_and_keeps_collections_empty() {
        let config = Config::default();
        assert!(!config.strict);
        assert!(!config.entropy);
        assert!(config.base64_cutoff.is_none());
        assert!(config.hex_cutoff.is_none());
        assert!(config.assignment_pattern.is_none());
        assert!(config.stopwords.is_none());
        assert!(config.disabled_detectors.is_empty());
        assert!(config.custom_detectors.is_empty());
        assert!(config.concurrency.is_none());
        assert!(config.timeout_secs.is_none());
    }

    #[test]
    fn config_new_is_identical_to_default() {
        let new = Config::new();
        let default = Config::default();
        assert_eq!(new.strict, default.strict);
        assert_eq!(new.disabled_detectors, default.disabled_detectors);
    }

    #[test]
    fn from_toml_parses_gate_flags() {
        let config = Config::from_toml("strict = true\nentropy = true").unwrap();
        assert!(config.strict);
        assert!(config.entropy);
    }

    #[test]
    fn from_toml_parses_entropy_overrides() {
        let toml = r#"
            base64_cutoff = 90
            hex_cutoff = 50
            assignment_pattern = '->'
            base64_alphabet = "abc"
            hex_alphabet = "0123456789"
        "#;
        let config = Config::from_toml(toml).unwrap();
        assert_eq!(config.base64_cutoff, Some(90));
        assert_eq!(config.hex_cutoff, Some(50));
        assert_eq!(config.assignment_pattern.as_deref(), Some("->"));
        assert_eq!(config.base64_alphabet.as_deref(), Some("abc"));
        assert_eq!(config.hex_alphabet.as_deref(), Some("0123456789"));
    }

    #[test]
    fn from_toml_parses_stopword_replacement_list() {
        let config = Config::from_toml(r#"stopwords = ["sample", "fixture"]"#).unwrap();
        assert_eq!(config.stopwords, Some(vec!["sample".to_string(), "fixture".to_string()]));
    }

    #[test]
    fn from_toml_parses_disabled_detectors_list() {
        let config =
            Config::from_toml(r#"disabled_detectors = ["aws-access-key-id", "slack-token"]"#).unwrap();
        assert_eq!(config.disabled_detectors.len(), 2);
        assert!(config.is_disabled("slack-token"));
        assert!(!config.is_disabled("google-api-key"));
    }

    #[test]
    fn from_toml_parses_minimal_custom_detector() {
        let toml = r#"
            [[detectors]]
            name = "my-token"
            regex = 'MY_TOKEN_[A-Z0-9]{32}'
        "#;
        let config = Config::from_toml(toml).unwrap();
        assert_eq!(config.custom_detectors.len(), 1);
        assert_eq!(config.custom_detectors[0].name, "my-token");
        assert!(config.custom_detectors[0].keywords.is_empty());
    }

    #[test]
    fn from_toml_parses_custom_detector_with_optional_fields() {
        let toml = r#"
            [[detectors]]
            name = "full"
            description = "A fully specified detector"
            regex = 'FULL_[A-Z]{16}'
            keywords = ["FULL_"]
        "#;
        let config = Config::from_toml(toml).unwrap();
        let detector = &config.custom_detectors[0];
        assert_eq!(detector.description.as_deref(), Some("A fully specified detector"));
        assert_eq!(detector.keywords, vec!["FULL_"]);
    }

    #[test]
    fn from_toml_parses_multiple_custom_detectors_in_order() {
        let toml = r#"
            [[detectors]]
            name = "first"
            regex = 'FIRST_[A-Z]{8}'

            [[detectors]]
            name = "second"
            regex = 'SECOND_[A-Z]{8}'
        "#;
        let config = Config::from_toml(toml).unwrap();
        assert_eq!(config.custom_detectors.len(), 2);
        assert_eq!(config.custom_detectors[0].name, "first");
        assert_eq!(config.custom_detectors[1].name, "second");
    }

    #[test]
    fn from_toml_parses_complete_config_with_all_fields() {
        let toml = r#"
            strict = true
            entropy = true
            base64_cutoff = 80
            hex_cutoff = 45
            stopwords = ["placeholder"]
            disabled_detectors = ["twilio-api-key"]
            concurrency = 4
            timeout_secs = 600

            [[detectors]]
            name = "internal-token"
            regex = 'INT_[0-9]{8}'
        "#;
        let config = Config::from_toml(toml).unwrap();
        assert!(config.strict);
        assert!(config.entropy);
        assert_eq!(config.base64_cutoff, Some(80));
        assert_eq!(config.hex_cutoff, Some(45));
        assert_eq!(config.disabled_detectors, vec!["twilio-api-key"]);
        assert_eq!(config.concurrency, Some(4));
        assert_eq!(config.timeout_secs, Some(600));
        assert_eq!(config.custom_detectors.len(), 1);
    }

    #[test]
    fn from_toml_returns_defaults_for_empty_string() {
        let config = Config::from_toml("").unwrap();
        assert!(!config.strict);
        assert!(config.custom_detectors.is_empty());
    }

    #[test]
    fn from_toml_rejects_malformed_toml_syntax() {
        let result = Config::from_toml("this is { not valid toml");
        assert!(result.is_err());
    }

    #[test]
    fn from_toml_rejects_wrongly_typed_cutoff() {
        let result = Config::from_toml(r#"base64_cutoff = "seventy""#);
        assert!(result.is_err());
    }

    #[test]
    fn load_returns_default_config_when_file_not_found() {
        let config = Config::load(Path::new("/nonexistent/path/.seep.toml")).unwrap();
        assert!(!config.strict);
        assert!(config.custom_detectors.is_empty());
    }

    #[test]
    fn load_parses_existing_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "strict = true").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert!(config.strict);
    }

    #[test]
    fn custom_detector_compile_succeeds_with_valid_regex() {
        let detector = CustomDetector {
            name: "valid".into(),
            description: None,
            regex: r"TEST_[A-Z]{8}".into(),
            keywords: vec![],
        };
        let compiled = detector.compile().unwrap();
        assert!(compiled.regex.is_match("TEST_ABCDEFGH"));
        assert!(!compiled.regex.is_match("TEST_abc"));
    }

    #[test]
    fn custom_detector_compile_fails_with_unclosed_bracket() {
        let detector = CustomDetector {
            name: "invalid".into(),
            description: None,
            regex: r"[unclosed".into(),
            keywords: vec![],
        };
        let error = detector.compile().unwrap_err();
        assert!(error.to_string().contains("invalid"));
    }

    #[test]
    fn custom_detector_compile_uses_name_when_description_absent() {
        let detector = CustomDetector {
            name: "bare-name".into(),
            description: None,
            regex: r"X".into(),
            keywords: vec![],
        };
        let compiled = detector.compile().unwrap();
        assert_eq!(compiled.description.as_ref(), "bare-name");
    }

    #[test]
    fn custom_detector_compile_preserves_explicit_description() {
        let detector = CustomDetector {
            name: "named".into(),
            description: Some("Explicit description".into()),
            regex: r"X".into(),
            keywords: vec![],
        };
        let compiled = detector.compile().unwrap();
        assert_eq!(compiled.description.as_ref(), "Explicit description");
    }

    #[test]
    fn compile_custom_detectors_returns_empty_vec_for_no_detectors() {
        let config = Config::default();
        let detectors = config.compile_custom_detectors().unwrap();
        assert!(detectors.is_empty());
    }

    #[test]
    fn compile_custom_detectors_compiles_all_detectors() {
        let config = Config::from_toml(
            r#"
            [[detectors]]
            name = "a"
            regex = 'A'

            [[detectors]]
            name = "b"
            regex = 'B'
        "#,
        )
        .unwrap();

        let detectors = config.compile_custom_detectors().unwrap();
        assert_eq!(detectors.len(), 2);
    }

    #[test]
    fn compile_custom_detectors_fails_fast_on_invalid_regex() {
        let config = Config::from_toml(
            r#"
            [[detectors]]
            name = "valid"
            regex = 'OK'

            [[detectors]]
            name = "broken"
            regex = '[broken'
        "#,
        )
        .unwrap();

        let result = config.compile_custom_detectors();
        assert!(result.is_err());
    }

    #[test]
    fn config_error_includes_path_in_display() {
        let error = ConfigError::Read {
            path: PathBuf::from("/etc/seep.toml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        };
        let message = error.to_string();
        assert!(message.contains("/etc/seep.toml"));
    }

    #[test]
    fn config_error_path_returns_path_for_both_variants() {
        let read = ConfigError::Read {
            path: PathBuf::from("/test/read"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(read.path(), Path::new("/test/read"));

        let parse = Config::from_toml("not = = valid").unwrap_err();
        assert_eq!(parse.path(), Path::new("<inline>"));
    }
}
