//! Gateway implementation that shells out to the `git` binary.

use std::collections::HashSet;
use std::path::Path;
use std::process::Command;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use seep_core::Commit;
use tempfile::TempDir;

use super::VcsGateway;
use super::types::RepoSource;

/// Field separator used in `git log` format strings (ASCII unit separator).
const LOG_FIELD_SEPARATOR: char = '\u{1f}';
const LOG_FORMAT: &str = "--pretty=format:%H%x1f%an <%ae>%x1f%aI%x1f%s";

/// A repository cloned into a temporary workspace, driven through `git`
/// subprocesses.
///
/// Every invocation passes `-C <workspace>`, so the process-wide working
/// directory is never touched and concurrent audits cannot interfere.
#[derive(Debug)]
pub struct GitProcess {
    workspace: TempDir,
}

impl GitProcess {
    /// Clones the source repository into a fresh temporary workspace.
    pub fn clone_repo(source: &RepoSource) -> anyhow::Result<Self> {
        let workspace = TempDir::with_prefix("seep-").context("creating clone workspace")?;

        let output = Command::new("git")
            .args(["clone", "--quiet", source.as_str()])
            .arg(workspace.path())
            .output()
            .context("running git clone")?;

        if !output.status.success() {
            anyhow::bail!(
                "git clone of '{}' failed: {}",
                source.as_str(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(Self { workspace })
    }

    /// Path of the temporary clone.
    #[must_use]
    pub fn workspace_path(&self) -> &Path {
        self.workspace.path()
    }

    /// Removes the clone workspace, reporting any filesystem error.
    pub fn teardown(self) -> anyhow::Result<()> {
        self.workspace.close().context("removing clone workspace")
    }

    fn git(&self, args: &[&str]) -> anyhow::Result<String> {
        let command = args.first().copied().unwrap_or("git");

        let output = Command::new("git")
            .arg("-C")
            .arg(self.workspace.path())
            .args(args)
            .output()
            .with_context(|| format!("running git {command}"))?;

        if !output.status.success() {
            anyhow::bail!(
                "git {command} failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl VcsGateway for GitProcess {
    fn branches(&self) -> anyhow::Result<Vec<String>> {
        let listing = self.git(&["branch", "-a"])?;
        Ok(scannable_branches(&listing))
    }

    fn commits(&self, branch: &str) -> anyhow::Result<Vec<Commit>> {
        let log = self.git(&["log", branch, LOG_FORMAT])?;
        Ok(parse_log(&log))
    }

    fn diff(&self, older: &str, newer: &str) -> anyhow::Result<String> {
        self.git(&["diff", older, newer])
    }
}

/// Extracts scannable branch names from `git branch -a` output.
///
/// Skips blank lines, symbolic refs (`->`), and detached-HEAD markers;
/// strips the `* ` current-branch marker; de-duplicates while preserving
/// listing order.
fn scannable_branches(listing: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut branches = Vec::new();

    for line in listing.lines() {
        let name = line.trim().trim_start_matches("* ").trim();

        if name.is_empty() || name.contains("->") || name.starts_with('(') {
            continue;
        }

        if seen.insert(name.to_string()) {
            branches.push(name.to_string());
        }
    }

    branches
}

fn parse_log(log: &str) -> Vec<Commit> {
    log.lines().filter_map(parse_log_line).collect()
}

fn parse_log_line(line: &str) -> Option<Commit> {
    let mut fields = line.split(LOG_FIELD_SEPARATOR);
    let hash = fields.next()?;
    let author = fields.next()?;
    let date = fields.next()?;
    let message = fields.next().unwrap_or("");

    if hash.is_empty() {
        return None;
    }

    let date = DateTime::parse_from_rfc3339(date).ok()?.with_timezone(&Utc);

    Some(Commit {
        hash: hash.to_string(),
        author: author.to_string(),
        date,
        message: message.to_string(),
    })
}
