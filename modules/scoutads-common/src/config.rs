use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::quality::TOP_N;

pub const DEFAULT_DATA_DIR: &str = ".scoutads";
pub const DEFAULT_LATENCY_MS: u64 = 1200;

/// Application configuration loaded from environment variables, optionally
/// overridden by a TOML file.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory holding the local preference files.
    pub data_dir: PathBuf,

    /// Simulated search latency.
    pub latency_ms: u64,

    /// JSON array of creatives to search instead of the built-in fixtures.
    pub creatives_file: Option<PathBuf>,

    /// Entries shown in the top-advertiser and top-country lists.
    pub top_n: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            latency_ms: DEFAULT_LATENCY_MS,
            creatives_file: None,
            top_n: TOP_N,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Unset variables keep defaults;
    /// set but malformed numbers are an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            data_dir: lookup("SCOUTADS_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            latency_ms: match lookup("SCOUTADS_LATENCY_MS") {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .with_context(|| format!("SCOUTADS_LATENCY_MS must be a number, got {raw:?}"))?,
                None => defaults.latency_ms,
            },
            creatives_file: lookup("SCOUTADS_CREATIVES_FILE")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            top_n: match lookup("SCOUTADS_TOP_N") {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .with_context(|| format!("SCOUTADS_TOP_N must be a number, got {raw:?}"))?,
                None => defaults.top_n,
            },
        })
    }

    /// Layer values from a TOML file over this config.
    pub fn merge_file(mut self, file: &FileConfig) -> Self {
        if let Some(dir) = &file.storage.data_dir {
            self.data_dir = dir.clone();
        }
        if let Some(path) = &file.source.creatives_file {
            self.creatives_file = Some(path.clone());
        }
        if let Some(ms) = file.search.latency_ms {
            self.latency_ms = ms;
        }
        if let Some(n) = file.search.top_n {
            self.top_n = n;
        }
        self
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    pub fn log_redacted(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  SCOUTADS_DATA_DIR: {}", self.data_dir.display());
        tracing::info!("  SCOUTADS_LATENCY_MS: {}", self.latency_ms);
        tracing::info!(
            "  SCOUTADS_CREATIVES_FILE: {}",
            self.creatives_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<fixtures>".to_string())
        );
        tracing::info!("  SCOUTADS_TOP_N: {}", self.top_n);
    }
}

/// TOML-backed configuration. Every section and key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    pub creatives_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    pub latency_ms: Option<u64>,
    pub top_n: Option<usize>,
}

/// Load and parse a TOML config file.
pub fn load_config(path: &Path) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: FileConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    Ok(config)
}
