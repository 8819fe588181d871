//! JSON snapshot source
//!
//! Reads the document printed by `aws elasticache describe-replication-groups`.
//! Only the fields the check needs are decoded; everything else is ignored.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::topology::{MemberNode, NodeGroup, ReplicationGroup, Topology};

use super::{SourceError, TopologySource};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeReplicationGroupsOutput {
    #[serde(default)]
    replication_groups: Vec<RawReplicationGroup>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawReplicationGroup {
    replication_group_id: Option<String>,
    #[serde(default)]
    node_groups: Vec<RawNodeGroup>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawNodeGroup {
    node_group_id: Option<String>,
    #[serde(default)]
    node_group_members: Vec<RawNodeGroupMember>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawNodeGroupMember {
    cache_cluster_id: Option<String>,
    current_role: Option<String>,
}

impl From<DescribeReplicationGroupsOutput> for Topology {
    fn from(output: DescribeReplicationGroupsOutput) -> Self {
        let replication_groups = output
            .replication_groups
            .into_iter()
            .map(|g| ReplicationGroup {
                id: g.replication_group_id.unwrap_or_default(),
                node_groups: g
                    .node_groups
                    .into_iter()
                    .map(|ng| NodeGroup {
                        id: ng.node_group_id.unwrap_or_default(),
                        members: ng
                            .node_group_members
                            .into_iter()
                            .map(|m| {
                                MemberNode::new(
                                    m.cache_cluster_id.unwrap_or_default(),
                                    m.current_role.unwrap_or_default(),
                                )
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect();

        Topology { replication_groups }
    }
}

/// Parse a describe-replication-groups JSON document
pub fn parse_snapshot(json: &str) -> Result<Topology, SourceError> {
    let output: DescribeReplicationGroupsOutput = serde_json::from_str(json)?;
    Ok(output.into())
}

/// Topology read from a JSON file on disk
pub struct SnapshotSource {
    path: PathBuf,
}

impl SnapshotSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl TopologySource for SnapshotSource {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    async fn fetch(&self) -> Result<Topology, SourceError> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let topology = parse_snapshot(&content)?;
        debug!(
            path = %self.path.display(),
            replication_groups = topology.replication_groups.len(),
            "Loaded topology snapshot"
        );
        Ok(topology)
    }
}
