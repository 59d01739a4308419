//! Persistence for the resolved release snapshot

use crate::core::TargetRelease;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads and writes the snapshot document
///
/// The snapshot is a JSON object keyed by target name, produced by the
/// resolver and consumed unmodified by the release gate. Saving the same
/// snapshot twice produces byte-identical files.
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Create a store backed by the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the snapshot, replacing any previous one
    pub async fn save(&self, releases: &IndexMap<String, TargetRelease>) -> Result<()> {
        let mut json = serde_json::to_string_pretty(releases)
            .context("Failed to serialize target releases")?;
        json.push('\n');

        tokio::fs::write(&self.path, json)
            .await
            .with_context(|| format!("Failed to write snapshot to {}", self.path.display()))?;

        debug!("Saved {} target release(s) to {}", releases.len(), self.path.display());
        Ok(())
    }

    /// Read the snapshot back, preserving the order targets were saved in
    pub async fn load(&self) -> Result<IndexMap<String, TargetRelease>> {
        let json = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read snapshot from {}", self.path.display()))?;

        let releases = serde_json::from_str(&json)
            .with_context(|| format!("Invalid snapshot document at {}", self.path.display()))?;

        Ok(releases)
    }
}
