//! Git repository access for history auditing.

mod proc;
mod types;

use seep_core::Commit;

pub use self::proc::GitProcess;
pub use self::types::RepoSource;

/// Scan-time repository operations needed by the audit pipeline.
///
/// Implemented by [`GitProcess`] in production. Tests substitute an
/// in-memory fake, which keeps the pipeline logic testable without real
/// repositories. Workspace construction and teardown stay on the concrete
/// type; the pipeline never creates or destroys clones.
pub trait VcsGateway: Send + Sync {
    /// Lists scannable branch names.
    fn branches(&self) -> anyhow::Result<Vec<String>>;

    /// Lists a branch's commits, newest first.
    fn commits(&self, branch: &str) -> anyhow::Result<Vec<Commit>>;

    /// Returns the textual diff between two commits.
    fn diff(&self, older: &str, newer: &str) -> anyhow::Result<String>;
}
