//! Project configuration from YAML

use anyhow::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level project configuration loaded from YAML
///
/// Declaration order of the `targets` mapping is preserved; diagnostics and
/// the snapshot document follow it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Path to the Xcode project bundle
    pub xcodeproj: String,

    /// Name of the build configuration to read settings from
    pub configuration: String,

    /// Declared targets, keyed by target name
    pub targets: IndexMap<String, TargetConfig>,
}

/// Per-target declarative settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Whether this target takes part in release gating (opt-in)
    #[serde(default)]
    pub enabled: bool,

    /// Application identifier on the distribution service
    #[serde(rename = "app-id")]
    pub app_id: String,
}

impl ProjectConfig {
    /// Load project configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse project configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: ProjectConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the project configuration
    pub fn validate(&self) -> Result<()> {
        if self.xcodeproj.trim().is_empty() {
            anyhow::bail!("xcodeproj path must not be empty");
        }

        if self.configuration.trim().is_empty() {
            anyhow::bail!("configuration name must not be empty");
        }

        if self.targets.is_empty() {
            anyhow::bail!("at least one target must be declared");
        }

        // A disabled target may keep a placeholder app-id; an enabled one may not.
        for (name, target) in &self.targets {
            if target.enabled && target.app_id.trim().is_empty() {
                anyhow::bail!("target '{}' is enabled but has no app-id", name);
            }
        }

        Ok(())
    }
}
