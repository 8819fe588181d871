//! Topology sources
//!
//! A source produces one `Topology` snapshot per check. Two implementations:
//! - `ElastiCacheSource`: live `DescribeReplicationGroups` calls
//! - `SnapshotSource`: a JSON file in the AWS CLI output shape

mod elasticache;
mod snapshot;

use async_trait::async_trait;

use crate::topology::Topology;

pub use elasticache::ElastiCacheSource;
pub use snapshot::SnapshotSource;

/// Error while fetching a topology
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse snapshot: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{0}")]
    Provider(String),
}

/// Supplies the replication topology for one check run
#[async_trait]
pub trait TopologySource: Send + Sync {
    /// Short label for logging
    fn name(&self) -> &'static str;

    /// Fetch the full topology. Called exactly once per run.
    async fn fetch(&self) -> Result<Topology, SourceError>;
}
