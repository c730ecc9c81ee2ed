//! Types flowing through the audit pipeline.

use seep_core::{Commit, Finding};
use serde::Serialize;

/// Two adjacent commits on a branch, diffed and scanned as a unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitPair {
    /// The earlier commit of the pair.
    pub older: Commit,
    /// The later commit; its metadata is stamped onto findings.
    pub newer: Commit,
}

impl CommitPair {
    /// Cache key identifying this pair across branches.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}{}", self.older.hash, self.newer.hash)
    }
}

/// One scanned pair's results, sent from a worker to the aggregator.
///
/// Sent even when `findings` is empty so the aggregator can count scanned
/// pairs.
#[derive(Debug)]
pub struct PairReport {
    /// Branch the pair was scanned under.
    pub branch: String,
    /// Hash of the older commit.
    pub older: String,
    /// Hash of the newer commit.
    pub newer: String,
    /// Leaks detected in the pair's diff.
    pub findings: Vec<Finding>,
}

/// One report artifact entry: all leaks found in a single commit pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    /// Leaks detected in the pair's diff.
    pub lines: Vec<Finding>,
    /// Branch the pair was scanned under.
    pub branch: String,
    /// Hash of the older commit.
    #[serde(rename = "commitA")]
    pub older: String,
    /// Hash of the newer commit.
    #[serde(rename = "commitB")]
    pub newer: String,
}

/// A branch the audit did not scan, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedBranch {
    /// Branch name as listed by the gateway.
    pub name: String,
    /// Why the branch was skipped.
    pub reason: String,
}

/// Results of a complete audit run.
#[derive(Debug)]
pub struct AuditOutcome {
    /// Report entries, sorted by branch, then older and newer hash.
    pub entries: Vec<ReportEntry>,
    /// Number of branches whose pairs were fanned out.
    pub branches_scanned: usize,
    /// Number of commit pairs actually diffed and scanned.
    pub pairs_scanned: usize,
    /// Total leaks across all entries.
    pub leak_count: usize,
    /// Branches skipped by failure or cancellation.
    pub skipped_branches: Vec<SkippedBranch>,
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use seep_core::Commit;

    use super::*;

    fn commit(hash: &str) -> Commit {
        Commit {
            hash: hash.to_string(),
            author: "Dev <dev@example.com>".to_string(),
            date: DateTime::from_timestamp(1_700_000_000, 0).unwrap_or_default(),
            message: "msg".to_string(),
        }
    }

    #[test]
    fn pair_key_concatenates_older_then_newer() {
        let pair = CommitPair {
            older: commit("aaa"),
            newer: commit("bbb"),
        };
        assert_eq!(pair.key(), "aaabbb");
    }

    #[test]
    fn report_entry_serialises_with_commit_a_and_b_names() {
        let entry = ReportEntry {
            lines: vec![],
            branch: "master".to_string(),
            older: "aaa".to_string(),
            newer: "bbb".to_string(),
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["commitA"], "aaa");
        assert_eq!(json["commitB"], "bbb");
        assert_eq!(json["branch"], "master");
        assert!(json["lines"].as_array().unwrap().is_empty());
    }
}
