//! Build project collaborators: target listing, build settings, bundle metadata

pub mod plist_reader;
pub mod xcodebuild;

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use plist_reader::PlistBundleReader;
pub use xcodebuild::XcodebuildProject;

/// Error types for project introspection and bundle reading
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Project not found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("Build tool error: {0}")]
    Tool(String),

    #[error("Timeout after {0} seconds")]
    Timeout(u64),

    #[error("Could not read bundle metadata from {}: {detail}", .path.display())]
    Bundle { path: PathBuf, detail: String },
}

/// Raw version fields read from a target's bundle metadata
///
/// Both values are carried as strings exactly as the bundle declares them;
/// the resolver decides what must parse and what may not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleMetadata {
    /// Marketing version (CFBundleShortVersionString)
    pub version: String,

    /// Build number (CFBundleVersion)
    pub build: String,
}

/// Trait for reading a build-system project - allows for different implementations
#[async_trait]
pub trait BuildProject: Send + Sync {
    /// Names of the targets the project defines
    async fn targets(&self) -> Result<Vec<String>, ProjectError>;

    /// Names of the build configurations available to a target
    async fn configurations(&self, target: &str) -> Result<Vec<String>, ProjectError>;

    /// Resolved build settings for a target under a configuration
    async fn build_settings(
        &self,
        target: &str,
        configuration: &str,
    ) -> Result<HashMap<String, String>, ProjectError>;

    /// Directory that relative paths in build settings resolve against
    fn root_dir(&self) -> &Path;
}

/// Trait for reading version fields out of a bundle metadata file
#[async_trait]
pub trait BundleReader: Send + Sync {
    /// Read the version and build number from the file at `path`
    async fn read(&self, path: &Path) -> Result<BundleMetadata, ProjectError>;
}
