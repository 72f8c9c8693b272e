//! CLI configuration loaded from environment variables.

use std::path::PathBuf;

use anyhow::{Context, Result};
use aurum_store::StorePaths;

/// Default maximum age of a cached gold rate, in seconds.
pub const DEFAULT_RATE_MAX_AGE_SECS: u64 = 900;

/// Upper bound accepted by `chrono::Duration::seconds`.
const MAX_RATE_AGE_SECS: u64 = (i64::MAX / 1_000) as u64;

#[derive(Clone, Debug)]
pub struct CliConfig {
    /// Directory holding the limits and gold-rate files.
    pub data_dir: PathBuf,
    /// Cached rates older than this are used with a warning.
    pub rate_max_age_secs: u64,
    /// Log level filter string (e.g. "info", "aurum_store=debug").
    pub log_level: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            rate_max_age_secs: DEFAULT_RATE_MAX_AGE_SECS,
            log_level: "info".to_string(),
        }
    }
}

impl CliConfig {
    /// Load configuration from `AURUM_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = lookup("AURUM_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        let rate_max_age_secs = match lookup("AURUM_RATE_MAX_AGE_SECS") {
            Some(raw) => raw
                .parse()
                .context("AURUM_RATE_MAX_AGE_SECS must be a non-negative integer")?,
            None => DEFAULT_RATE_MAX_AGE_SECS,
        };

        let log_level = lookup("AURUM_LOG").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            data_dir,
            rate_max_age_secs,
            log_level,
        })
    }

    pub fn store_paths(&self) -> StorePaths {
        StorePaths::under(&self.data_dir)
    }

    pub fn rate_max_age(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.rate_max_age_secs.min(MAX_RATE_AGE_SECS) as i64)
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("aurum")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let cfg = CliConfig::from_lookup(|_| None).unwrap();
        assert_eq!(cfg.rate_max_age_secs, DEFAULT_RATE_MAX_AGE_SECS);
        assert_eq!(cfg.log_level, "info");
        assert!(cfg.data_dir.ends_with("aurum"), "data_dir: {:?}", cfg.data_dir);
    }

    #[test]
    fn env_overrides() {
        let cfg = CliConfig::from_lookup(lookup_from(&[
            ("AURUM_DATA_DIR", "/tmp/aurum-cfg"),
            ("AURUM_RATE_MAX_AGE_SECS", "60"),
            ("AURUM_LOG", "debug"),
        ]))
        .unwrap();
        assert_eq!(cfg.data_dir, PathBuf::from("/tmp/aurum-cfg"));
        assert_eq!(cfg.rate_max_age(), chrono::Duration::seconds(60));
        assert_eq!(cfg.log_level, "debug");
    }

    #[test]
    fn bad_max_age_is_an_error() {
        let err = CliConfig::from_lookup(lookup_from(&[("AURUM_RATE_MAX_AGE_SECS", "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains("AURUM_RATE_MAX_AGE_SECS"));
    }

    #[test]
    fn store_paths_follow_data_dir() {
        let cfg = CliConfig {
            data_dir: PathBuf::from("/tmp/aurum-cfg"),
            ..CliConfig::default()
        };
        assert_eq!(
            cfg.store_paths().limits,
            PathBuf::from("/tmp/aurum-cfg/limits.json")
        );
    }
}
