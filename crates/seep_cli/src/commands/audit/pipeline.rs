//! Audit pipeline - branch fan-out, pair scanning, and aggregation.
//!
//! Branches are processed in listing order. Within a branch, commit pairs fan
//! out across the rayon pool; every worker sends its scanned pair to a single
//! run-lifetime aggregator thread over an mpsc channel. The orchestrator
//! drops the last sender after the final branch, so the channel closes
//! exactly once, and the aggregator's join gates the outcome: no report is
//! assembled while workers could still be sending.

use std::sync::mpsc::{Receiver, Sender};

use anyhow::Context as _;
use rayon::prelude::*;
use seep_core::{Commit, Engine};

use super::cache::PairCache;
use super::cancel::CancelToken;
use super::types::{AuditOutcome, CommitPair, PairReport, ReportEntry, SkippedBranch};
use crate::git::VcsGateway;
use crate::ui::create_pair_progress;

const CANCELLED_REASON: &str = "cancelled";

/// Scans every scannable branch of the repository behind `gateway`.
///
/// Branch discovery failure is fatal. A branch whose commit listing fails is
/// recorded as skipped; a pair whose diff fails is dropped silently. Pairs
/// shared between branches are scanned exactly once.
pub fn run_audit<G: VcsGateway>(
    gateway: &G,
    engine: &Engine,
    repo_url: &str,
    cancel: &CancelToken,
    show_progress: bool,
) -> anyhow::Result<AuditOutcome> {
    let branches = gateway.branches().context("listing branches")?;

    let cache = PairCache::new();
    let (tx, rx) = std::sync::mpsc::channel::<PairReport>();
    let aggregator = std::thread::spawn(move || aggregate(rx));

    let mut branches_scanned = 0usize;
    let mut skipped_branches = Vec::new();

    for branch in &branches {
        if cancel.is_cancelled() {
            skipped_branches.push(SkippedBranch {
                name: branch.clone(),
                reason: CANCELLED_REASON.to_string(),
            });
            continue;
        }

        let commits = match gateway.commits(branch) {
            Ok(commits) => commits,
            Err(error) => {
                skipped_branches.push(SkippedBranch {
                    name: branch.clone(),
                    reason: format!("{error:#}"),
                });
                continue;
            }
        };

        let pairs = commit_pairs(&commits);
        let pb = (show_progress && !pairs.is_empty())
            .then(|| create_pair_progress(branch, pairs.len()));

        pairs.par_iter().for_each_with(tx.clone(), |tx, pair| {
            scan_pair(gateway, engine, repo_url, branch, pair, &cache, cancel, tx);
            if let Some(pb) = &pb {
                pb.inc(1);
            }
        });

        if let Some(pb) = pb {
            pb.finish_and_clear();
        }

        branches_scanned += 1;
    }

    drop(tx);

    let aggregated = aggregator
        .join()
        .map_err(|_| anyhow::anyhow!("aggregator thread panicked"))?;

    let mut entries = aggregated.entries;
    entries.sort_unstable_by(|a, b| {
        (&a.branch, &a.older, &a.newer).cmp(&(&b.branch, &b.older, &b.newer))
    });

    Ok(AuditOutcome {
        entries,
        branches_scanned,
        pairs_scanned: aggregated.pairs_scanned,
        leak_count: aggregated.leak_count,
        skipped_branches,
    })
}

/// Pairs a newest-first commit list into adjacent (older, newer) couples.
///
/// `n` commits yield `n - 1` pairs; the pair containing the root commit is
/// included, while a single-commit branch yields none.
#[must_use]
pub fn commit_pairs(commits: &[Commit]) -> Vec<CommitPair> {
    commits
        .windows(2)
        .map(|window| CommitPair {
            newer: window[0].clone(),
            older: window[1].clone(),
        })
        .collect()
}

#[expect(clippy::too_many_arguments, reason = "worker body; bundling these would only obscure the protocol")]
fn scan_pair<G: VcsGateway>(
    gateway: &G,
    engine: &Engine,
    repo_url: &str,
    branch: &str,
    pair: &CommitPair,
    cache: &PairCache,
    cancel: &CancelToken,
    tx: &mut Sender<PairReport>,
) {
    if cancel.is_cancelled() {
        return;
    }

    let key = pair.key();
    if cache.contains(&key) {
        return;
    }

    // Claim before diffing; the loser of a race skips the pair entirely.
    if !cache.claim(key) {
        return;
    }

    let diff = match gateway.diff(&pair.older.hash, &pair.newer.hash) {
        Ok(diff) => diff,
        Err(_error) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                older = %pair.older.short_hash(),
                newer = %pair.newer.short_hash(),
                error = %_error,
                "diff failed, skipping pair"
            );
            return;
        }
    };

    let findings = engine.scan_diff(&diff, &pair.newer, repo_url);

    let report = PairReport {
        branch: branch.to_string(),
        older: pair.older.hash.clone(),
        newer: pair.newer.hash.clone(),
        findings,
    };

    // A send failure means the aggregator is gone; stop producing work.
    if tx.send(report).is_err() {
        cancel.cancel();
    }
}

struct Aggregated {
    entries: Vec<ReportEntry>,
    pairs_scanned: usize,
    leak_count: usize,
}

fn aggregate(rx: Receiver<PairReport>) -> Aggregated {
    let mut entries = Vec::new();
    let mut pairs_scanned = 0usize;
    let mut leak_count = 0usize;

    while let Ok(report) = rx.recv() {
        pairs_scanned += 1;

        if report.findings.is_empty() {
            continue;
        }

        leak_count += report.findings.len();
        entries.push(ReportEntry {
            lines: report.findings,
            branch: report.branch,
            older: report.older,
            newer: report.newer,
        });
    }

    Aggregated {
        entries,
        pairs_scanned,
        leak_count,
    }
}
