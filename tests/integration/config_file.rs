//! Configuration file handling

use std::io::Write as _;

use crate::{fixture, run_check};

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_target_from_config_file() {
    let config = write_config(&format!(
        r#"
[check]
replication_group = "rg1"
node_group = "ng1"
primary_node = "cluster-a"
topology_file = "{}"
"#,
        fixture("primary.json").display()
    ));

    let output = run_check(["--config", config.path().to_str().unwrap()]);
    assert_eq!(output.code, 0, "{}", output.stdout);
}

#[test]
fn test_flags_override_config_file() {
    let config = write_config(&format!(
        r#"
[check]
replication_group = "rg1"
node_group = "ng1"
primary_node = "cluster-b"
severity = "warning"
topology_file = "{}"
"#,
        fixture("primary.json").display()
    ));

    // cluster-b is a replica and the file asks for warning
    let output = run_check(["--config", config.path().to_str().unwrap()]);
    assert_eq!(output.code, 1);

    let output = run_check([
        "--config",
        config.path().to_str().unwrap(),
        "--primary-node",
        "cluster-a",
    ]);
    assert_eq!(output.code, 0);

    let output = run_check([
        "--config",
        config.path().to_str().unwrap(),
        "--severity",
        "critical",
    ]);
    assert_eq!(output.code, 2);
}

#[test]
fn test_invalid_config_file() {
    let config = write_config("[check\n");

    let output = run_check(["--config", config.path().to_str().unwrap()]);
    assert_eq!(output.code, 3);
    assert!(output
        .stdout
        .starts_with("CheckElastiCacheFailover UNKNOWN: Failed to parse config:"));
}
