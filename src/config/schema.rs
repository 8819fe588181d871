use std::path::PathBuf;

use serde::Deserialize;

use crate::check::Severity;
use crate::topology::CheckTarget;

use super::ConfigError;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// What to check
    #[serde(default)]
    pub check: CheckConfig,
    /// Credentials and endpoint selection
    #[serde(default)]
    pub aws: AwsConfig,
    /// Region auto-discovery
    #[serde(default)]
    pub region: RegionConfig,
}

// ============================================================================
// Check Configuration
// ============================================================================

/// Target node and alert level
///
/// All three identifiers are optional here so that they can come from the
/// command line instead; `Config::target` rejects a missing one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckConfig {
    /// Replication group id
    #[serde(default)]
    pub replication_group: Option<String>,
    /// Node group (shard) id, e.g. "0001"
    #[serde(default)]
    pub node_group: Option<String>,
    /// Cache cluster id that should hold the primary role
    #[serde(default)]
    pub primary_node: Option<String>,
    /// Severity reported when the node is not primary
    #[serde(default)]
    pub severity: Severity,
    /// Read the topology from a describe-replication-groups JSON file
    #[serde(default)]
    pub topology_file: Option<PathBuf>,
}

// ============================================================================
// AWS Configuration
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AwsConfig {
    /// Shared credentials profile name
    #[serde(default)]
    pub profile: Option<String>,
    /// Explicit region; skips auto-discovery when set
    #[serde(default)]
    pub region: Option<String>,
}

// ============================================================================
// Region Discovery Configuration
// ============================================================================

/// Instance metadata lookup used when no region is configured
#[derive(Debug, Clone, Deserialize)]
pub struct RegionConfig {
    /// Base URL of the instance metadata service
    #[serde(default = "default_metadata_endpoint")]
    pub metadata_endpoint: String,
    /// Hard timeout for the whole lookup (milliseconds)
    #[serde(default = "default_metadata_timeout_ms")]
    pub metadata_timeout_ms: u64,
}

fn default_metadata_endpoint() -> String {
    "http://169.254.169.254".to_string()
}

fn default_metadata_timeout_ms() -> u64 {
    3000
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            metadata_endpoint: default_metadata_endpoint(),
            metadata_timeout_ms: default_metadata_timeout_ms(),
        }
    }
}

impl Config {
    /// Build the check target, failing on the first missing identifier
    pub fn target(&self) -> Result<CheckTarget, ConfigError> {
        Ok(CheckTarget::new(
            required(&self.check.replication_group, "replication-group")?,
            required(&self.check.node_group, "node-group")?,
            required(&self.check.primary_node, "primary-node")?,
        ))
    }
}

fn required(value: &Option<String>, name: &'static str) -> Result<String, ConfigError> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ConfigError::MissingField(name)),
    }
}
