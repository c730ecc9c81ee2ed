//! Report artifact writing and terminal summary for audit runs.

use std::fs::File;
use std::io::{BufWriter, Write as _};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;

use super::types::{AuditOutcome, ReportEntry};
use crate::ui::{self, colors, format_duration, indicators, pluralise_word};

/// Returns the default report path for a repository name, e.g.
/// `railsgoat_leaks.json` in the current directory.
#[must_use]
pub fn artifact_path(repo_name: &str) -> PathBuf {
    PathBuf::from(format!("{repo_name}_leaks.json"))
}

/// Writes the report entries to `path` as pretty-printed JSON.
///
/// A clean audit still produces an artifact containing an empty array.
pub fn write_artifact(path: &Path, entries: &[ReportEntry]) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create report file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, entries)?;
    writeln!(writer)?;

    Ok(())
}

/// Prints the styled end-of-run summary and any skipped-branch warnings.
pub fn print_summary(outcome: &AuditOutcome, artifact: &Path, elapsed: Duration) {
    for skipped in &outcome.skipped_branches {
        ui::print_warning(&format!("skipped branch {}: {}", skipped.name, skipped.reason));
    }

    let branches = format!(
        "{} {}",
        outcome.branches_scanned,
        pluralise_word(outcome.branches_scanned, "branch", "branches")
    );
    let pairs = format!(
        "{} {}",
        outcome.pairs_scanned,
        pluralise_word(outcome.pairs_scanned, "pair", "pairs")
    );
    let timing = format!("({})", format_duration(elapsed));

    println!();

    if outcome.leak_count == 0 {
        println!(
            "{} {} {} {} {} {} {}",
            colors::success().apply_to(indicators::SUCCESS),
            colors::primary().apply_to("No leaks found"),
            colors::muted().apply_to("·"),
            colors::muted().apply_to(&branches),
            colors::muted().apply_to("·"),
            colors::muted().apply_to(&pairs),
            colors::muted().apply_to(&timing),
        );
    } else {
        let leaks = format!(
            "{} {} found",
            outcome.leak_count,
            pluralise_word(outcome.leak_count, "leak", "leaks")
        );

        println!(
            "{} {} {} {} {} {} {}",
            colors::error().apply_to(indicators::ERROR),
            colors::primary().apply_to(&leaks),
            colors::muted().apply_to("·"),
            colors::muted().apply_to(&branches),
            colors::muted().apply_to("·"),
            colors::muted().apply_to(&pairs),
            colors::muted().apply_to(&timing),
        );
    }

    println!(
        "  {} {}",
        colors::muted().apply_to("report:"),
        colors::secondary().apply_to(artifact.display().to_string()),
    );
    println!();
}
