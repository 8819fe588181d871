//! Region resolution
//!
//! The AWS region is taken from the first provider that yields one:
//! 1. explicit `--region` / config value
//! 2. `AWS_REGION` / `AWS_DEFAULT_REGION`
//! 3. the selected profile in the shared config file
//! 4. the EC2 instance metadata service
//!
//! Providers never fail; a provider that cannot answer returns None.

mod metadata;

use async_trait::async_trait;
use aws_config::meta::region::ProvideRegion;
use aws_config::profile::ProfileFileRegionProvider;
use tracing::debug;

use crate::config::RegionConfig;

pub use metadata::InstanceMetadataRegion;

/// A single best-effort source of a region name
#[async_trait]
pub trait RegionProvider: Send + Sync {
    /// Short label for logging
    fn name(&self) -> &'static str;

    async fn region(&self) -> Option<String>;
}

/// Evaluate providers in order and return the first region found
///
/// Later providers are not consulted once one succeeds.
pub async fn first_available(providers: &[Box<dyn RegionProvider>]) -> Option<String> {
    for provider in providers {
        match provider.region().await {
            Some(region) => {
                debug!(provider = provider.name(), region = %region, "Region resolved");
                return Some(region);
            }
            None => debug!(provider = provider.name(), "No region from provider"),
        }
    }
    None
}

/// The standard provider chain
pub fn default_chain(
    explicit: Option<String>,
    profile: Option<String>,
    config: &RegionConfig,
) -> Vec<Box<dyn RegionProvider>> {
    vec![
        Box::new(ExplicitRegion(explicit)),
        Box::new(EnvironmentRegion::default()),
        Box::new(ProfileRegion { profile }),
        Box::new(InstanceMetadataRegion::from_config(config)),
    ]
}

/// Region given on the command line or in the config file
pub struct ExplicitRegion(pub Option<String>);

#[async_trait]
impl RegionProvider for ExplicitRegion {
    fn name(&self) -> &'static str {
        "explicit"
    }

    async fn region(&self) -> Option<String> {
        non_empty(self.0.as_deref())
    }
}

/// Region from environment variables, first non-empty wins
pub struct EnvironmentRegion {
    vars: Vec<&'static str>,
}

impl EnvironmentRegion {
    pub fn new(vars: Vec<&'static str>) -> Self {
        Self { vars }
    }
}

impl Default for EnvironmentRegion {
    fn default() -> Self {
        Self::new(vec!["AWS_REGION", "AWS_DEFAULT_REGION"])
    }
}

#[async_trait]
impl RegionProvider for EnvironmentRegion {
    fn name(&self) -> &'static str {
        "environment"
    }

    async fn region(&self) -> Option<String> {
        self.vars
            .iter()
            .find_map(|var| non_empty(std::env::var(var).ok().as_deref()))
    }
}

/// Region configured for a profile in `~/.aws/config`
pub struct ProfileRegion {
    pub profile: Option<String>,
}

#[async_trait]
impl RegionProvider for ProfileRegion {
    fn name(&self) -> &'static str {
        "profile"
    }

    async fn region(&self) -> Option<String> {
        let mut builder = ProfileFileRegionProvider::builder();
        if let Some(profile) = &self.profile {
            builder = builder.profile_name(profile);
        }
        let provider = builder.build();
        let region = ProvideRegion::region(&provider).await?;
        non_empty(Some(region.as_ref()))
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
