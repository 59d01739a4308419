//! Distribution service client for published release lookups

pub mod http;
pub mod release;

use async_trait::async_trait;

pub use http::{DistributionConfig, HttpReleaseClient, DEFAULT_API_URL};
pub use release::{LookupError, RemoteRelease};

/// Trait for looking up published releases - allows for different implementations
#[async_trait]
pub trait ReleaseLookup: Send + Sync {
    /// Latest release the service knows for the given application identifier
    async fn latest_release(&self, app_id: &str) -> Result<RemoteRelease, LookupError>;
}
