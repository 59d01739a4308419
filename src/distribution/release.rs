//! Published release types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for published release lookups
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("No published versions for app {0}")]
    NoReleases(String),

    #[error("Unexpected response: {0}")]
    Malformed(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Latest release as reported by the distribution service
///
/// Fetched on demand per application identifier and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteRelease {
    /// Marketing version string
    pub version: String,

    /// Build number of the newest published upload
    pub build: u64,
}
