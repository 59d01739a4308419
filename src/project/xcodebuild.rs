//! Xcode project reader - shells out to xcodebuild

use crate::project::{BuildProject, ProjectError};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;
use tokio::sync::OnceCell;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Default timeout for one xcodebuild invocation in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Reads targets, configurations, and build settings through the
/// `xcodebuild` command-line tool
#[derive(Debug)]
pub struct XcodebuildProject {
    /// Path to the .xcodeproj bundle
    project_path: PathBuf,

    /// Timeout for each xcodebuild invocation in seconds
    timeout_secs: u64,

    /// Output of `xcodebuild -list`, fetched on first use
    cached_list: OnceCell<ProjectList>,
}

/// The `project` object of `xcodebuild -list -json` output
#[derive(Debug, Deserialize)]
struct ListOutput {
    project: ProjectList,
}

#[derive(Debug, Deserialize)]
struct ProjectList {
    #[serde(default)]
    targets: Vec<String>,

    #[serde(default)]
    configurations: Vec<String>,
}

/// One entry of `xcodebuild -showBuildSettings -json` output
#[derive(Debug, Deserialize)]
struct SettingsEntry {
    target: String,

    #[serde(rename = "buildSettings")]
    build_settings: HashMap<String, String>,
}

impl XcodebuildProject {
    /// Create a new project reader
    ///
    /// # Arguments
    /// * `project_path` - Path to the .xcodeproj bundle
    pub fn new(project_path: impl Into<PathBuf>) -> Self {
        Self {
            project_path: project_path.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            cached_list: OnceCell::new(),
        }
    }

    /// Override the per-invocation timeout
    #[allow(dead_code)]
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Base xcodebuild command pointed at the project
    fn command(&self) -> Command {
        let mut cmd = Command::new("xcodebuild");
        cmd.arg("-project").arg(&self.project_path);
        cmd.kill_on_drop(true);
        cmd
    }

    /// Run an xcodebuild command and capture stdout
    ///
    /// # Errors
    /// Returns `ProjectError` if:
    /// - xcodebuild cannot be spawned
    /// - xcodebuild exits with a non-zero status
    /// - The command times out
    async fn run(&self, mut cmd: Command) -> Result<Vec<u8>, ProjectError> {
        debug!("Spawning {:?}", cmd);

        let timeout_duration = Duration::from_secs(self.timeout_secs);

        let result = timeout(timeout_duration, cmd.output())
            .await
            .map_err(|_| ProjectError::Timeout(self.timeout_secs))?;

        let output = result
            .map_err(|e| ProjectError::Tool(format!("Failed to run xcodebuild: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let exit_code = output.status.code().unwrap_or(-1);
            warn!("xcodebuild exited with code {}: {}", exit_code, stderr.trim());
            return Err(ProjectError::Tool(format!(
                "xcodebuild exited with code {}: {}",
                exit_code,
                stderr.trim()
            )));
        }

        Ok(output.stdout)
    }

    /// Fetch and cache the -list output
    async fn list(&self) -> Result<&ProjectList, ProjectError> {
        self.cached_list.get_or_try_init(|| self.fetch_list()).await
    }

    async fn fetch_list(&self) -> Result<ProjectList, ProjectError> {
        if !self.project_path.exists() {
            return Err(ProjectError::NotFound(self.project_path.clone()));
        }

        let mut cmd = self.command();
        cmd.arg("-list").arg("-json");

        let stdout = self.run(cmd).await?;
        let parsed: ListOutput = serde_json::from_slice(&stdout).map_err(|e| {
            ProjectError::Tool(format!("Failed to parse xcodebuild -list output: {}", e))
        })?;

        debug!(
            "Project lists {} targets and {} configurations",
            parsed.project.targets.len(),
            parsed.project.configurations.len()
        );

        Ok(parsed.project)
    }
}

#[async_trait]
impl BuildProject for XcodebuildProject {
    async fn targets(&self) -> Result<Vec<String>, ProjectError> {
        Ok(self.list().await?.targets.clone())
    }

    // xcodebuild reports configurations at the project level; every target
    // shares the same set.
    async fn configurations(&self, _target: &str) -> Result<Vec<String>, ProjectError> {
        Ok(self.list().await?.configurations.clone())
    }

    async fn build_settings(
        &self,
        target: &str,
        configuration: &str,
    ) -> Result<HashMap<String, String>, ProjectError> {
        let mut cmd = self.command();
        cmd.arg("-showBuildSettings")
            .arg("-json")
            .arg("-target")
            .arg(target)
            .arg("-configuration")
            .arg(configuration);

        let stdout = self.run(cmd).await?;
        let entries: Vec<SettingsEntry> = serde_json::from_slice(&stdout).map_err(|e| {
            ProjectError::Tool(format!("Failed to parse xcodebuild build settings: {}", e))
        })?;

        entries
            .into_iter()
            .find(|entry| entry.target == target)
            .map(|entry| entry.build_settings)
            .ok_or_else(|| {
                ProjectError::Tool(format!("No build settings reported for target '{}'", target))
            })
    }

    fn root_dir(&self) -> &Path {
        self.project_path.parent().unwrap_or(Path::new(""))
    }
}
