//! Detector loading and engine construction.

use std::collections::HashSet;

use anyhow::Context as _;
use seep_core::prelude::*;

use crate::AuditArgs;

/// Loads built-in detectors, removes any disabled by configuration, and
/// merges in user-defined custom detectors.
pub fn load_detectors(config: &Config) -> anyhow::Result<DetectorSet> {
    let mut detectors = DetectorSet::builtin()?.into_detectors();

    if !config.disabled_detectors.is_empty() {
        let disabled: HashSet<&str> = config.disabled_detectors.iter().map(String::as_str).collect();
        detectors.retain(|d| !disabled.contains(d.name.as_ref()));
    }

    let custom = config.compile_custom_detectors().context("compiling custom detectors")?;
    detectors.extend(custom);

    Ok(DetectorSet::new(detectors))
}

/// Builds the scanning engine from loaded detectors, configuration, and
/// command-line flags. Flags win over config values.
pub fn build_engine(detectors: DetectorSet, config: &Config, args: &AuditArgs) -> anyhow::Result<Engine> {
    let mut engine = Engine::new(detectors);

    if args.strict || config.strict {
        let filter = match &config.stopwords {
            Some(words) => StopwordFilter::new(words),
            None => StopwordFilter::standard(),
        };
        engine = engine.with_stopwords(filter);
    }

    if args.entropy || config.entropy {
        engine = engine.with_entropy_gate(build_entropy_gate(config, args)?);
    }

    Ok(engine)
}

fn build_entropy_gate(config: &Config, args: &AuditArgs) -> anyhow::Result<EntropyGate> {
    use seep_core::entropy::{
        BASE64_ALPHABET, DEFAULT_ASSIGNMENT_PATTERN, DEFAULT_BASE64_CUTOFF, DEFAULT_HEX_CUTOFF, HEX_ALPHABET,
    };

    let pattern = config.assignment_pattern.as_deref().unwrap_or(DEFAULT_ASSIGNMENT_PATTERN);
    let base64_cutoff = args.base64_cutoff.or(config.base64_cutoff).unwrap_or(DEFAULT_BASE64_CUTOFF);
    let hex_cutoff = args.hex_cutoff.or(config.hex_cutoff).unwrap_or(DEFAULT_HEX_CUTOFF);

    let mut gate =
        EntropyGate::new(pattern, base64_cutoff, hex_cutoff).context("compiling assignment pattern")?;

    if config.base64_alphabet.is_some() || config.hex_alphabet.is_some() {
        gate = gate.with_alphabets(
            config.base64_alphabet.as_deref().unwrap_or(BASE64_ALPHABET),
            config.hex_alphabet.as_deref().unwrap_or(HEX_ALPHABET),
        );
    }

    Ok(gate)
}

/// Configures the global rayon thread pool with the requested number of
/// threads, if specified.
pub fn configure_thread_pool(concurrency: Option<usize>) -> anyhow::Result<()> {
    if let Some(n) = concurrency {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .context("failed to configure thread pool")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_detectors_returns_builtin_set_for_default_config() {
        let config = Config::default();
        let detectors = load_detectors(&config).unwrap();
        assert_eq!(detectors.len(), DetectorSet::builtin().unwrap().len());
    }

    #[test]
    fn load_detectors_removes_disabled_builtins() {
        let config = Config::from_toml(r#"disabled_detectors = ["aws-access-key-id"]"#).unwrap();

        let detectors = load_detectors(&config).unwrap();
        assert!(detectors.get("aws-access-key-id").is_none());
        assert!(detectors.get("slack-token").is_some());
    }

    #[test]
    fn load_detectors_merges_custom_detectors() {
        let config = Config::from_toml(
            r#"
            [[detectors]]
            name = "internal-token"
            regex = 'INT_[0-9]{8}'
            keywords = ["INT_"]
        "#,
        )
        .unwrap();

        let detectors = load_detectors(&config).unwrap();
        assert!(detectors.get("internal-token").is_some());
        assert_eq!(detectors.len(), DetectorSet::builtin().unwrap().len() + 1);
    }

    #[test]
    fn load_detectors_rejects_invalid_custom_regex() {
        let config = Config::from_toml(
            r#"
            [[detectors]]
            name = "broken"
            regex = '[unclosed'
        "#,
        )
        .unwrap();

        assert!(load_detectors(&config).is_err());
    }
}
