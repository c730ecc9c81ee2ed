use thiserror::Error;

/// Errors that can occur when compiling a detector definition.
#[derive(Debug, Error)]
pub enum DetectorError {
    /// The detector's regular expression failed to compile.
    #[error("invalid regex in detector '{name}': {source}")]
    InvalidRegex {
        /// Name of the detector that failed (e.g. `"aws-access-key-id"`).
        name: String,
        /// The underlying regex compilation error.
        #[source]
        source: regex::Error,
    },
}

/// Top-level error type for the seep detection pipeline.
///
/// Unifies detector compilation and configuration errors into a single type
/// for callers that orchestrate the full workflow.
#[derive(Debug, Error)]
pub enum SeepError {
    /// A detector failed to compile.
    #[error(transparent)]
    Detector(#[from] DetectorError),

    /// Configuration could not be read or parsed.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
}
