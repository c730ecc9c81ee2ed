//! Audit context - configuration and engine loading.

use std::path::Path;
use std::time::Duration;

use anyhow::Context as _;
use seep_core::prelude::*;

use crate::scanning::{build_engine, load_detectors};
use crate::{AuditArgs, CONFIG_FILENAME};

/// Loaded engine and configuration for an audit run.
#[derive(Debug)]
pub struct AuditContext {
    /// The compiled scanning engine with its gates applied.
    pub engine: Engine,
    /// Parsed configuration from `.seep.toml`.
    pub config: Config,
}

impl AuditContext {
    /// Loads configuration and builds the engine from CLI arguments.
    pub fn load(args: &AuditArgs) -> anyhow::Result<Self> {
        let config_path = args.config.as_deref().unwrap_or(Path::new(CONFIG_FILENAME));
        let config = Config::load(config_path).context("loading config")?;

        let detectors = load_detectors(&config)?;
        let engine = build_engine(detectors, &config, args)?;

        Ok(Self { engine, config })
    }

    /// Returns the effective worker count, preferring the CLI argument.
    #[must_use]
    pub fn concurrency(&self, arg: Option<usize>) -> Option<usize> {
        arg.or(self.config.concurrency)
    }

    /// Returns the effective run deadline, preferring the CLI argument.
    #[must_use]
    pub fn timeout(&self, arg_secs: Option<u64>) -> Option<Duration> {
        arg_secs.or(self.config.timeout_secs).map(Duration::from_secs)
    }
}
