//! Bundle metadata reader for Info.plist files

use crate::project::{BundleMetadata, BundleReader, ProjectError};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Reads version fields from Info.plist files (XML or binary)
#[derive(Debug, Clone, Default)]
pub struct PlistBundleReader;

/// The two version keys every app bundle carries
#[derive(Debug, Deserialize)]
struct InfoPlist {
    #[serde(rename = "CFBundleShortVersionString")]
    version: String,

    #[serde(rename = "CFBundleVersion")]
    build: String,
}

impl PlistBundleReader {
    /// Create a new plist reader
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl BundleReader for PlistBundleReader {
    async fn read(&self, path: &Path) -> Result<BundleMetadata, ProjectError> {
        debug!("Reading bundle metadata from {}", path.display());

        let bytes = tokio::fs::read(path).await.map_err(|e| ProjectError::Bundle {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;

        let plist: InfoPlist = plist::from_bytes(&bytes).map_err(|e| ProjectError::Bundle {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;

        Ok(BundleMetadata {
            version: plist.version,
            build: plist.build,
        })
    }
}
