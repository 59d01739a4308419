//! Target resolution against the build project

use crate::core::config::ProjectConfig;
use crate::core::release::TargetRelease;
use crate::core::version::{MalformedVersion, Version};
use crate::project::{BuildProject, BundleReader, ProjectError};
use indexmap::IndexMap;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Build setting naming the bundle metadata file
pub const INFOPLIST_FILE_SETTING: &str = "INFOPLIST_FILE";

/// Error types for target resolution
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Target '{target}' has no build configuration named '{configuration}'")]
    ConfigurationNotFound {
        target: String,
        configuration: String,
    },

    #[error("Target '{target}' has no INFOPLIST_FILE build setting")]
    MissingInfoPlist { target: String },

    #[error("Target '{target}' has build number '{value}', which is not an integer")]
    MalformedBuildNumber { target: String, value: String },

    #[error("Target '{target}' has a malformed version: {source}")]
    MalformedVersion {
        target: String,
        source: MalformedVersion,
    },

    #[error(transparent)]
    Project(#[from] ProjectError),
}

/// A declared target left out of resolution, with the reason
///
/// Skips are diagnostics, not errors; the caller decides how to log them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkippedTarget {
    /// The project defines no target with this name
    NotInProject { target: String },

    /// The target is declared but not enabled
    Disabled { target: String },
}

impl SkippedTarget {
    /// Name of the skipped target
    pub fn target(&self) -> &str {
        match self {
            SkippedTarget::NotInProject { target } => target,
            SkippedTarget::Disabled { target } => target,
        }
    }
}

impl fmt::Display for SkippedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkippedTarget::NotInProject { target } => write!(
                f,
                "Skipping target {}, as the project doesn't contain a corresponding target.",
                target
            ),
            SkippedTarget::Disabled { target } => {
                write!(f, "Skipping target {}, because it is disabled.", target)
            }
        }
    }
}

/// Output of one resolver run
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Release record per surviving target, in declaration order
    pub releases: IndexMap<String, TargetRelease>,

    /// Targets left out, in declaration order
    pub skipped: Vec<SkippedTarget>,
}

/// Resolve the declared targets against the build project and extract each
/// surviving target's version and build number.
///
/// Targets missing from the project or not enabled are skipped with a
/// diagnostic and absent from the result. A missing build configuration, an
/// unreadable bundle, or a malformed version or build number aborts the
/// whole run.
pub async fn resolve(
    config: &ProjectConfig,
    project: &dyn BuildProject,
    bundles: &dyn BundleReader,
) -> Result<Resolution, ResolveError> {
    let available = project.targets().await?;

    let mut releases = IndexMap::new();
    let mut skipped = Vec::new();

    for (name, target) in &config.targets {
        if !available.iter().any(|t| t == name) {
            debug!("Target {} not present in the project", name);
            skipped.push(SkippedTarget::NotInProject {
                target: name.clone(),
            });
            continue;
        }

        if !target.enabled {
            debug!("Target {} is disabled", name);
            skipped.push(SkippedTarget::Disabled {
                target: name.clone(),
            });
            continue;
        }

        let configurations = project.configurations(name).await?;
        if !configurations.iter().any(|c| c == &config.configuration) {
            return Err(ResolveError::ConfigurationNotFound {
                target: name.clone(),
                configuration: config.configuration.clone(),
            });
        }

        let settings = project.build_settings(name, &config.configuration).await?;
        let plist_file = settings
            .get(INFOPLIST_FILE_SETTING)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ResolveError::MissingInfoPlist {
                target: name.clone(),
            })?;

        let metadata = bundles.read(&project.root_dir().join(plist_file)).await?;

        // Reject a malformed version here rather than at verification time.
        Version::parse(&metadata.version).map_err(|e| ResolveError::MalformedVersion {
            target: name.clone(),
            source: e,
        })?;

        let build = metadata.build.trim().parse::<u64>().map_err(|_| {
            ResolveError::MalformedBuildNumber {
                target: name.clone(),
                value: metadata.build.clone(),
            }
        })?;

        debug!("Target {} resolved to {} ({})", name, metadata.version, build);

        releases.insert(
            name.clone(),
            TargetRelease {
                app_id: target.app_id.clone(),
                version: metadata.version,
                build,
            },
        );
    }

    Ok(Resolution { releases, skipped })
}
