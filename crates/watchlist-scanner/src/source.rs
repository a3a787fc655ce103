use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;

use crate::snapshot::WatchlistSnapshot;

/// Supplies the current watchlist snapshots on each polling tick
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<WatchlistSnapshot>>;
}

/// Reads a JSON array of snapshots from disk, re-read on every fetch
pub struct FileSnapshotSource {
    path: PathBuf,
}

impl FileSnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SnapshotSource for FileSnapshotSource {
    async fn fetch(&self) -> Result<Vec<WatchlistSnapshot>> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read snapshot file {}", self.path.display()))?;

        let snapshots: Vec<WatchlistSnapshot> = serde_json::from_str(&raw)
            .with_context(|| format!("Malformed snapshot file {}", self.path.display()))?;

        tracing::debug!("Loaded {} snapshots from {}", snapshots.len(), self.path.display());
        Ok(snapshots)
    }
}
