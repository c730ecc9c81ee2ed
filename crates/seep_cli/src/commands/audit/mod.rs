//! Audit command - clones a repository and scans its commit history for
//! leaked secrets.
//!
//! Every scannable branch is walked newest-first; adjacent commit pairs are
//! diffed and scanned concurrently, with pairs shared between branches
//! scanned only once. Findings land in a `<repo>_leaks.json` artifact next
//! to the working directory, and the process exits non-zero when leaks are
//! found unless `--exit-zero` is set.

mod cache;
mod cancel;
mod context;
mod output;
mod pipeline;
mod types;

pub use pipeline::{commit_pairs, run_audit};
pub use types::*;

use std::time::Instant;

use anyhow::Context as _;

use self::cancel::CancelToken;
use self::context::AuditContext;
use crate::AuditArgs;
use crate::git::{GitProcess, RepoSource};
use crate::scanning::configure_thread_pool;
use crate::ui::{exit, print_command_header, print_info};

/// Executes the `seep audit` command.
pub fn run(args: &AuditArgs) -> super::Result {
    print_command_header("audit");

    let start = Instant::now();

    let context = AuditContext::load(args)?;
    configure_thread_pool(context.concurrency(args.concurrency))?;

    let source = RepoSource::parse(&args.repo);
    print_info(&format!("cloning {}", source.as_str()));

    let workspace = GitProcess::clone_repo(&source).context("cloning repository")?;

    let cancel = CancelToken::with_timeout(context.timeout(args.timeout));
    let outcome = run_audit(&workspace, &context.engine, source.as_str(), &cancel, true)?;

    let artifact = args
        .output
        .clone()
        .unwrap_or_else(|| output::artifact_path(source.name()));
    output::write_artifact(&artifact, &outcome.entries)?;

    workspace.teardown()?;

    output::print_summary(&outcome, &artifact, start.elapsed());

    if !args.exit_zero && outcome.leak_count > 0 {
        std::process::exit(exit::FINDINGS);
    }

    Ok(())
}
