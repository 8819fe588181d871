//! Role evaluation for a located node

use crate::topology::{CheckTarget, MemberNode};

use super::{CheckResult, Severity};

/// Classify a located node by its reported role
///
/// Healthy only when the role is exactly "primary". Any other value,
/// including different casing or an empty role, raises an alert at the
/// configured severity.
pub fn evaluate(node: &MemberNode, target: &CheckTarget, severity: &Severity) -> CheckResult {
    let mut message = format!(
        "Node `{}` (in replication group `{}`, node group `{}`) is ",
        target.primary_cluster_id, target.replication_group_id, target.node_group_id
    );

    if node.is_primary() {
        message.push_str("`primary`.");
        CheckResult::Healthy(message)
    } else {
        message.push_str("**not** `primary`.");
        CheckResult::Alert(severity.clone(), message)
    }
}
