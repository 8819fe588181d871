//! Region discovery through the EC2 instance metadata service
//!
//! Reads the availability zone of the running instance and strips the zone
//! letter (`us-east-1a` -> `us-east-1`). An IMDSv2 session token is requested
//! first; if that fails the zone is requested without one. The whole
//! exchange is bounded by a single timeout and every failure yields None.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::config::RegionConfig;

use super::RegionProvider;

const TOKEN_PATH: &str = "/latest/api/token";
const AVAILABILITY_ZONE_PATH: &str = "/latest/meta-data/placement/availability-zone";
const TOKEN_TTL_HEADER: &str = "X-aws-ec2-metadata-token-ttl-seconds";
const TOKEN_HEADER: &str = "X-aws-ec2-metadata-token";
const TOKEN_TTL_SECONDS: &str = "60";

#[derive(Debug, thiserror::Error)]
enum MetadataError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Malformed availability zone: {0:?}")]
    MalformedZone(String),
}

/// Best-effort region lookup against the instance metadata endpoint
pub struct InstanceMetadataRegion {
    endpoint: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl InstanceMetadataRegion {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .no_proxy()
            .connect_timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            timeout,
            client,
        }
    }

    pub fn from_config(config: &RegionConfig) -> Self {
        Self::new(
            config.metadata_endpoint.clone(),
            Duration::from_millis(config.metadata_timeout_ms),
        )
    }

    async fn session_token(&self) -> Option<String> {
        let response = self
            .client
            .put(format!("{}{}", self.endpoint, TOKEN_PATH))
            .header(TOKEN_TTL_HEADER, TOKEN_TTL_SECONDS)
            .send()
            .await
            .ok()?;

        if !response.status().is_success() {
            debug!(status = %response.status(), "IMDSv2 token request rejected");
            return None;
        }
        response.text().await.ok().filter(|t| !t.is_empty())
    }

    async fn fetch_region(&self) -> Result<String, MetadataError> {
        let token = self.session_token().await;

        let mut request = self
            .client
            .get(format!("{}{}", self.endpoint, AVAILABILITY_ZONE_PATH));
        if let Some(token) = &token {
            request = request.header(TOKEN_HEADER, token);
        }

        let body = request.send().await?.error_for_status()?.text().await?;
        region_from_availability_zone(&body).ok_or(MetadataError::MalformedZone(body))
    }
}

#[async_trait]
impl RegionProvider for InstanceMetadataRegion {
    fn name(&self) -> &'static str {
        "instance-metadata"
    }

    async fn region(&self) -> Option<String> {
        match tokio::time::timeout(self.timeout, self.fetch_region()).await {
            Ok(Ok(region)) => Some(region),
            Ok(Err(e)) => {
                debug!(endpoint = %self.endpoint, error = %e, "Instance metadata lookup failed");
                None
            }
            Err(_) => {
                debug!(
                    endpoint = %self.endpoint,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Instance metadata lookup timed out"
                );
                None
            }
        }
    }
}

/// Derive a region name from an availability zone string
///
/// Trailing whitespace is trimmed, then the single zone letter is removed.
/// Returns None when the input does not look like `<region><letter>`.
pub fn region_from_availability_zone(zone: &str) -> Option<String> {
    let zone = zone.trim();
    if !zone.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return None;
    }

    let mut chars = zone.chars().rev();
    let letter = chars.next()?;
    let before = chars.next()?;
    if !letter.is_ascii_lowercase() || !before.is_ascii_digit() {
        return None;
    }

    Some(zone[..zone.len() - 1].to_string())
}
