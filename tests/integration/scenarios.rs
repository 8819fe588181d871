//! Check outcomes against topology snapshots

use crate::{fixture, run_check};

fn snapshot_args(file: &str, group: &str, node_group: &str, node: &str) -> Vec<String> {
    vec![
        "--topology-file".into(),
        fixture(file).display().to_string(),
        "--replication-group".into(),
        group.into(),
        "--node-group".into(),
        node_group.into(),
        "--primary-node".into(),
        node.into(),
    ]
}

#[test]
fn test_primary_is_ok() {
    let output = run_check(snapshot_args("primary.json", "rg1", "ng1", "cluster-a"));

    assert_eq!(output.code, 0);
    assert_eq!(
        output.stdout,
        "CheckElastiCacheFailover OK: Node `cluster-a` (in replication group `rg1`, node group `ng1`) is `primary`."
    );
}

#[test]
fn test_failed_over_is_critical_by_default() {
    let output = run_check(snapshot_args("failed_over.json", "rg1", "ng1", "cluster-a"));

    assert_eq!(output.code, 2);
    assert_eq!(
        output.stdout,
        "CheckElastiCacheFailover CRITICAL: Node `cluster-a` (in replication group `rg1`, node group `ng1`) is **not** `primary`."
    );
}

#[test]
fn test_failed_over_with_warning_severity() {
    let mut args = snapshot_args("failed_over.json", "rg1", "ng1", "cluster-a");
    args.extend(["--severity".to_string(), "warning".to_string()]);
    let output = run_check(args);

    assert_eq!(output.code, 1);
    assert!(output.stdout.starts_with("CheckElastiCacheFailover WARNING: "));
    assert!(output.stdout.ends_with("is **not** `primary`."));
}

#[test]
fn test_replica_in_healthy_cluster_alerts() {
    let output = run_check(snapshot_args("primary.json", "rg1", "ng1", "cluster-b"));
    assert_eq!(output.code, 2);
}

#[test]
fn test_missing_replication_group() {
    let output = run_check(snapshot_args("primary.json", "rg-missing", "ng1", "cluster-a"));

    assert_eq!(output.code, 3);
    assert_eq!(
        output.stdout,
        "CheckElastiCacheFailover UNKNOWN: Replication group not found."
    );
}

#[test]
fn test_missing_node_group() {
    let output = run_check(snapshot_args("primary.json", "rg1", "ng9", "cluster-a"));

    assert_eq!(output.code, 3);
    assert_eq!(output.stdout, "CheckElastiCacheFailover UNKNOWN: Node group not found.");
}

#[test]
fn test_missing_node() {
    let output = run_check(snapshot_args("primary.json", "rg1", "ng1", "cluster-z"));

    assert_eq!(output.code, 3);
    assert_eq!(output.stdout, "CheckElastiCacheFailover UNKNOWN: Node not found.");
}

#[test]
fn test_unreadable_snapshot() {
    let output = run_check(snapshot_args("does-not-exist.json", "rg1", "ng1", "cluster-a"));

    assert_eq!(output.code, 3);
    assert!(
        output
            .stdout
            .starts_with("CheckElastiCacheFailover UNKNOWN: Failed to describe replication groups:"),
        "{}",
        output.stdout
    );
}

#[test]
fn test_missing_target_option() {
    let output = run_check([
        "--topology-file",
        fixture("primary.json").to_str().unwrap(),
        "--replication-group",
        "rg1",
        "--primary-node",
        "cluster-a",
    ]);

    assert_eq!(output.code, 3);
    assert_eq!(
        output.stdout,
        "CheckElastiCacheFailover UNKNOWN: Missing required option: node-group"
    );
}

#[test]
fn test_invalid_flag_is_unknown() {
    let output = run_check(["--no-such-flag"]);

    assert_eq!(output.code, 3);
    assert!(output.stdout.starts_with("CheckElastiCacheFailover UNKNOWN: "));
}

#[test]
fn test_help_exits_zero() {
    let output = run_check(["--help"]);

    assert_eq!(output.code, 0);
    assert!(output.stdout.contains("--replication-group"));
}
