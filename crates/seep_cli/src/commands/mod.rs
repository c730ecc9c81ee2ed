//! CLI command handlers.

/// Full-history audit of a repository's branches.
pub mod audit;
/// Detector listing and inspection.
pub mod detectors;

/// Convenience alias for command return types.
pub type Result<T = ()> = anyhow::Result<T>;
