//! Where creatives come from.
//!
//! Today the record store is fixture data or a JSON export on disk; the trait
//! is the seam a remote ad-library query plugs into later.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::info;

use scoutads_common::{Creative, Result, ScoutAdsError};

use crate::fixtures;

#[async_trait]
pub trait CreativeSource: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Creative>>;
}

// --- FixtureSource ---

/// The built-in fixture creatives, or a caller-supplied set.
pub struct FixtureSource {
    creatives: Vec<Creative>,
}

impl FixtureSource {
    pub fn new(creatives: Vec<Creative>) -> Self {
        Self { creatives }
    }
}

impl Default for FixtureSource {
    fn default() -> Self {
        Self::new(fixtures::mock_creatives())
    }
}

#[async_trait]
impl CreativeSource for FixtureSource {
    async fn fetch_all(&self) -> Result<Vec<Creative>> {
        Ok(self.creatives.clone())
    }
}

// --- JsonFileSource ---

/// Reads a JSON array of creatives from disk on every fetch.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CreativeSource for JsonFileSource {
    async fn fetch_all(&self) -> Result<Vec<Creative>> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            ScoutAdsError::Source(format!("failed to read {}: {e}", self.path.display()))
        })?;
        let creatives: Vec<Creative> = serde_json::from_str(&content).map_err(|e| {
            ScoutAdsError::Source(format!("failed to parse {}: {e}", self.path.display()))
        })?;
        info!(path = %self.path.display(), count = creatives.len(), "Loaded creatives from file");
        Ok(creatives)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_source_returns_all_fixtures() {
        let creatives = FixtureSource::default().fetch_all().await.unwrap();
        assert_eq!(creatives.len(), 10);
    }

    #[tokio::test]
    async fn json_file_source_reads_exported_creatives() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("creatives.json");
        let subset: Vec<Creative> = fixtures::mock_creatives().into_iter().take(3).collect();
        std::fs::write(&path, serde_json::to_string(&subset).unwrap()).unwrap();

        let loaded = JsonFileSource::new(&path).fetch_all().await.unwrap();
        assert_eq!(loaded, subset);
    }

    #[tokio::test]
    async fn json_file_source_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = JsonFileSource::new(dir.path().join("missing.json"))
            .fetch_all()
            .await
            .unwrap_err();
        assert!(matches!(err, ScoutAdsError::Source(_)));
    }
}
