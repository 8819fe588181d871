//! Replication topology model
//!
//! A topology is the read-only tree returned by one describe call:
//! replication group -> node groups (shards) -> member nodes.
//! It is built fresh for every check and never mutated.

mod locator;

pub use locator::{locate, LocateFailure};

/// Role string reported by ElastiCache for the member serving writes
pub const PRIMARY_ROLE: &str = "primary";

/// Full replication topology snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Topology {
    pub replication_groups: Vec<ReplicationGroup>,
}

/// Replication group: provider-managed set of shards replicated for failover
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplicationGroup {
    pub id: String,
    pub node_groups: Vec<NodeGroup>,
}

/// Node group: one shard of a replication group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeGroup {
    pub id: String,
    pub members: Vec<MemberNode>,
}

/// One cache cluster participating in a node group
///
/// `current_role` is kept as an open string. The provider documents
/// "primary" and "replica" but may report other values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberNode {
    pub cluster_id: String,
    pub current_role: String,
}

impl MemberNode {
    pub fn new(cluster_id: impl Into<String>, current_role: impl Into<String>) -> Self {
        Self {
            cluster_id: cluster_id.into(),
            current_role: current_role.into(),
        }
    }

    /// Exact, case-sensitive comparison against "primary"
    pub fn is_primary(&self) -> bool {
        self.current_role == PRIMARY_ROLE
    }
}

/// Query key into a topology: which node should be primary, and where
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckTarget {
    pub replication_group_id: String,
    pub node_group_id: String,
    pub primary_cluster_id: String,
}

impl CheckTarget {
    pub fn new(
        replication_group_id: impl Into<String>,
        node_group_id: impl Into<String>,
        primary_cluster_id: impl Into<String>,
    ) -> Self {
        Self {
            replication_group_id: replication_group_id.into(),
            node_group_id: node_group_id.into(),
            primary_cluster_id: primary_cluster_id.into(),
        }
    }
}
