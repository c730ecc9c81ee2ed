//! # Commands
//!
//! - `seep audit` - Clone a repository and scan its history for leaks
//! - `seep detectors` - List loaded detection rules

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

mod commands;
mod git;
mod scanning;
mod ui;

use std::path::PathBuf;

use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use console::style;
pub use seep_core::CONFIG_FILENAME;

use crate::ui::colors;

const REPO_URL: &str = "https://github.com/jkeller/seep";

#[derive(Debug, Parser)]
#[command(
    name = "seep",
    version,
    styles = ui::clap_styles(),
    arg_required_else_help = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(visible_alias = "a")]
    Audit(AuditArgs),

    #[command(visible_alias = "d")]
    Detectors(DetectorsArgs),
}

/// Arguments for the `seep audit` command.
#[derive(Debug, Parser)]
pub struct AuditArgs {
    /// Repository to audit: a clone URL, scp-like address, or local path.
    #[arg(value_name = "REPO")]
    pub repo: String,

    /// Drop findings on lines containing known placeholder stopwords.
    #[arg(short, long)]
    pub strict: bool,

    /// Require candidate lines to pass a Shannon entropy gate.
    #[arg(short, long)]
    pub entropy: bool,

    /// Base64-alphabet entropy bits a value must exceed to pass the gate.
    #[arg(long, value_name = "BITS")]
    pub base64_cutoff: Option<u32>,

    /// Hex-alphabet entropy bits a value must exceed to pass the gate.
    #[arg(long, value_name = "BITS")]
    pub hex_cutoff: Option<u32>,

    /// Number of parallel scanning threads.
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Abort the audit after this many seconds.
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Path to `.seep.toml` configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the report to this path instead of `<repo>_leaks.json`.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Always exit with code 0, even when leaks are found.
    #[arg(long)]
    pub exit_zero: bool,
}

/// Arguments for the `seep detectors` command.
#[derive(Debug, Parser)]
pub struct DetectorsArgs {
    /// Path to `.seep.toml` configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Show detector details including regex and keywords.
    #[arg(short, long)]
    pub verbose: bool,
}

fn main() {
    #[cfg(feature = "tracing")]
    {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(false).without_time())
            .with(EnvFilter::from_default_env())
            .init();
    }

    let cli = parse_cli();

    if let Err(e) = run(cli.command) {
        ui::print_error(&format!("{e:#}"));
        std::process::exit(ui::exit::ERROR);
    }
}

fn parse_cli() -> Cli {
    let cmd = Cli::command().about(build_about()).after_help(build_after_help());

    let matches = cmd.get_matches();

    #[expect(clippy::expect_used, reason = "clap already validated args; this cannot fail")]
    Cli::from_arg_matches(&matches).expect("failed to parse arguments")
}

fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Audit(args) => commands::audit::run(&args),
        Command::Detectors(args) => commands::detectors::run(args.config.as_deref(), args.verbose),
    }
}

fn build_about() -> String {
    format!(
        r"
  {} digs through git history for secrets that should never have
  been committed.

  Clones a repository, walks every branch pair by pair, and reports
  API keys, tokens, and credentials in a JSON artifact.",
        colors::accent().apply_to("seep").bold()
    )
}

fn build_after_help() -> String {
    format!(
        r"
  {}
    seep audit https://github.com/acme/widget   Audit a remote repository
    seep audit /path/to/checkout                Audit a local repository
    seep audit repo.git --entropy --strict      Enable both noise gates
    seep audit repo.git --timeout 300           Abort after five minutes
    seep detectors                              List detection rules
    seep detectors --verbose                    Show detector regexes

  Learn more: {}",
        style("Examples:").bold(),
        colors::accent().apply_to(REPO_URL).underlined()
    )
}
