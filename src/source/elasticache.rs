//! Live ElastiCache topology source

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_elasticache::error::DisplayErrorContext;
use aws_sdk_elasticache::types;
use aws_sdk_elasticache::Client;
use tracing::{debug, info};

use crate::topology::{MemberNode, NodeGroup, ReplicationGroup, Topology};

use super::{SourceError, TopologySource};

/// Topology fetched with `DescribeReplicationGroups`
pub struct ElastiCacheSource {
    client: Client,
}

impl ElastiCacheSource {
    /// Build a client from the shared AWS config chain
    ///
    /// `profile` selects a shared-credentials profile. When `region` is None
    /// the SDK falls back to its own resolution.
    pub async fn new(profile: Option<&str>, region: Option<String>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(profile) = profile {
            loader = loader.profile_name(profile);
        }
        if let Some(region) = region {
            loader = loader.region(Region::new(region));
        }
        let sdk_config = loader.load().await;

        info!(
            profile = ?profile,
            region = ?sdk_config.region().map(|r| r.as_ref().to_string()),
            "ElastiCache client configured"
        );

        Self {
            client: Client::new(&sdk_config),
        }
    }
}

#[async_trait]
impl TopologySource for ElastiCacheSource {
    fn name(&self) -> &'static str {
        "elasticache"
    }

    async fn fetch(&self) -> Result<Topology, SourceError> {
        let mut pages = self
            .client
            .describe_replication_groups()
            .into_paginator()
            .send();

        let mut replication_groups = Vec::new();
        let mut page_count = 0usize;
        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| SourceError::Provider(DisplayErrorContext(&e).to_string()))?;
            page_count += 1;
            replication_groups.extend(page.replication_groups().iter().map(convert_group));
        }

        debug!(
            pages = page_count,
            replication_groups = replication_groups.len(),
            "Described replication groups"
        );
        Ok(Topology { replication_groups })
    }
}

fn convert_group(group: &types::ReplicationGroup) -> ReplicationGroup {
    ReplicationGroup {
        id: group.replication_group_id().unwrap_or_default().to_string(),
        node_groups: group.node_groups().iter().map(convert_node_group).collect(),
    }
}

fn convert_node_group(node_group: &types::NodeGroup) -> NodeGroup {
    NodeGroup {
        id: node_group.node_group_id().unwrap_or_default().to_string(),
        members: node_group
            .node_group_members()
            .iter()
            .map(|m| {
                MemberNode::new(
                    m.cache_cluster_id().unwrap_or_default(),
                    m.current_role().unwrap_or_default(),
                )
            })
            .collect(),
    }
}
