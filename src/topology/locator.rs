//! Locate the target member inside a topology
//!
//! Lookups run replication group -> node group -> member and stop at the
//! first level that has no match. The order decides which failure the
//! operator sees, so it must not change.

use super::{CheckTarget, MemberNode, Topology};

/// Which level of the topology failed to match
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LocateFailure {
    #[error("Replication group not found.")]
    ReplicationGroupNotFound,
    #[error("Node group not found.")]
    NodeGroupNotFound,
    #[error("Node not found.")]
    NodeNotFound,
}

/// Find the member matching all three identifiers of `target`
///
/// Each level is a linear scan with exact string equality. If duplicates
/// exist the first match wins.
pub fn locate<'a>(
    topology: &'a Topology,
    target: &CheckTarget,
) -> Result<&'a MemberNode, LocateFailure> {
    let replication_group = topology
        .replication_groups
        .iter()
        .find(|g| g.id == target.replication_group_id)
        .ok_or(LocateFailure::ReplicationGroupNotFound)?;

    let node_group = replication_group
        .node_groups
        .iter()
        .find(|g| g.id == target.node_group_id)
        .ok_or(LocateFailure::NodeGroupNotFound)?;

    node_group
        .members
        .iter()
        .find(|n| n.cluster_id == target.primary_cluster_id)
        .ok_or(LocateFailure::NodeNotFound)
}
