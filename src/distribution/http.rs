//! HTTP client for the distribution service API

use crate::distribution::{LookupError, ReleaseLookup, RemoteRelease};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Default API base URL
pub const DEFAULT_API_URL: &str = "https://rink.hockeyapp.net/api/2";

/// Default timeout for one lookup in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Header carrying the access token
const TOKEN_HEADER: &str = "X-HockeyAppToken";

/// Configuration for the distribution service client
#[derive(Debug, Clone)]
pub struct DistributionConfig {
    /// API base URL
    pub base_url: String,

    /// Access token sent with every request
    pub token: String,

    /// Timeout for each lookup in seconds
    pub timeout_secs: u64,
}

impl DistributionConfig {
    /// Create a new config for a specific service
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            token: token.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Override the per-lookup timeout
    #[allow(dead_code)]
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Client that queries the distribution service over HTTP
#[derive(Debug, Clone)]
pub struct HttpReleaseClient {
    config: DistributionConfig,
    http_client: reqwest::Client,
}

/// Response payload of the app_versions endpoint, newest upload first
#[derive(Debug, Deserialize)]
struct VersionsResponse {
    #[serde(default)]
    app_versions: Vec<AppVersionEntry>,
}

/// One published upload
///
/// The API names the build number `version` and the marketing version
/// `shortversion`.
#[derive(Debug, Deserialize)]
struct AppVersionEntry {
    version: String,
    shortversion: String,
}

impl HttpReleaseClient {
    /// Create a new client
    pub fn new(config: DistributionConfig) -> Result<Self, LookupError> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("shipgate/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LookupError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Map the newest entry of a versions payload to a release
    fn newest_release(
        app_id: &str,
        response: VersionsResponse,
    ) -> Result<RemoteRelease, LookupError> {
        let newest = response
            .app_versions
            .into_iter()
            .next()
            .ok_or_else(|| LookupError::NoReleases(app_id.to_string()))?;

        let build = newest.version.trim().parse::<u64>().map_err(|_| {
            LookupError::Malformed(format!(
                "published build number '{}' is not an integer",
                newest.version
            ))
        })?;

        Ok(RemoteRelease {
            version: newest.shortversion,
            build,
        })
    }
}

#[async_trait]
impl ReleaseLookup for HttpReleaseClient {
    async fn latest_release(&self, app_id: &str) -> Result<RemoteRelease, LookupError> {
        let url = format!(
            "{}/apps/{}/app_versions",
            self.config.base_url.trim_end_matches('/'),
            app_id
        );
        debug!("Fetching published versions from {}", url);

        let response = self
            .http_client
            .get(&url)
            .header(TOKEN_HEADER, &self.config.token)
            .send()
            .await
            .map_err(|e| LookupError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Lookup for app {} returned status {}", app_id, status);
            return Err(LookupError::Status {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        let payload: VersionsResponse = response
            .json()
            .await
            .map_err(|e| LookupError::Malformed(e.to_string()))?;

        Self::newest_release(app_id, payload)
    }
}
