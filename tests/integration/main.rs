//! Integration test entry point
//!
//! Runs the built binary against topology snapshots under `tests/fixtures`,
//! so no AWS access is needed.
//!
//! Run with: cargo test --test integration

mod config_file;
mod scenarios;

use std::path::PathBuf;
use std::process::Command;

/// Path of a fixture file
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Captured result of one check invocation
#[derive(Debug)]
pub struct CheckOutput {
    pub code: i32,
    pub stdout: String,
}

/// Run the check binary with the given arguments
pub fn run_check<I, S>(args: I) -> CheckOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    let output = Command::new(env!("CARGO_BIN_EXE_check-elasticache-failover"))
        .args(args)
        .env_remove("FAILOVER_CHECK_CONFIG")
        .env_remove("AWS_PROFILE")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run check binary");

    CheckOutput {
        code: output.status.code().expect("check terminated by signal"),
        stdout: String::from_utf8_lossy(&output.stdout).trim_end().to_string(),
    }
}
