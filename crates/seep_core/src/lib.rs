//! Core history auditing engine for seep.
//!
//! This crate scans commit-pair diffs for leaked credentials using a table of
//! regex detectors with keyword pre-filtering. It is designed to be embedded
//! in CLIs and CI pipelines; all git plumbing lives with the caller.
//!
//! # Main Types
//!
//! - [`Engine`] - Scans diff text and produces findings
//! - [`DetectorSet`] - Collection of detectors with keyword pre-filtering
//! - [`Finding`] - A detected leak with commit metadata
//! - [`EntropyGate`] - Shannon-entropy gate for assignment values
//! - [`Config`] - User configuration loaded from `.seep.toml`
//!
//! # Error Handling
//!
//! This crate uses [`thiserror`] for structured, typed errors that library
//! consumers can match on:
//!
//! - [`DetectorError`] - Detector compilation failures
//! - [`ConfigError`] - Configuration loading/parsing failures
//! - [`SeepError`] - Top-level error enum combining the above
//!
//! The CLI crate (`seep_cli`) uses `anyhow` for error propagation.

/// Commit metadata attached to findings.
pub mod commit;
/// User configuration loaded from `.seep.toml`.
pub mod config;
/// Detector definitions and the keyword-indexed detector set.
pub mod detector;
/// The diff scanning engine.
pub mod engine;
/// Shannon-entropy scoring for assignment values.
pub mod entropy;
/// Error types for detector compilation and configuration.
pub mod error;
/// Types representing detected leaks.
pub mod finding;
/// Common re-exports for internal use.
pub mod prelude;
/// Stopword suppression for strict mode.
pub mod stopwords;
#[cfg(test)]
pub(crate) mod test_utils;

pub use commit::Commit;
pub use config::{Config, ConfigError, CustomDetector};
pub use detector::{BUILTIN, Detector, DetectorDef, DetectorSet};
pub use engine::{Engine, diff_header_path};
pub use entropy::{EntropyGate, entropy_bits};
pub use error::{DetectorError, SeepError};
pub use finding::Finding;
pub use stopwords::StopwordFilter;

/// Default filename for seep configuration.
pub const CONFIG_FILENAME: &str = ".seep.toml";
