//! shipgate - Release gating for mobile app pipelines

pub mod cli;
pub mod core;
pub mod distribution;
pub mod persistence;
pub mod project;

// Re-export commonly used types
pub use crate::core::config::{ProjectConfig, TargetConfig};
pub use crate::core::{GateResult, ReleaseGate, TargetRelease, TargetVerdict, Version};
pub use crate::distribution::{LookupError, ReleaseLookup, RemoteRelease};
pub use crate::project::{BuildProject, BundleMetadata, BundleReader, ProjectError};
