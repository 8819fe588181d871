//! Check classification
//!
//! Turns a topology snapshot and a target into a `CheckResult`. Nothing in
//! this module performs I/O; presentation and exit codes live in `report`.

mod evaluator;

use std::fmt;

use serde::Deserialize;

use crate::topology::{locate, CheckTarget, LocateFailure, Topology};

pub use evaluator::evaluate;

/// Operator-supplied alert level
///
/// Carried verbatim from configuration to the alert. Tokens are never
/// validated here, so "warning", "critical" or anything else is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct Severity(String);

impl Severity {
    pub const DEFAULT: &'static str = "critical";

    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Severity {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of one check run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckResult {
    /// Target node holds the primary role
    Healthy(String),
    /// Target node is found but is not primary
    Alert(Severity, String),
    /// Result could not be determined
    Unknown(String),
}

impl CheckResult {
    pub fn message(&self) -> &str {
        match self {
            CheckResult::Healthy(message)
            | CheckResult::Alert(_, message)
            | CheckResult::Unknown(message) => message,
        }
    }
}

impl From<LocateFailure> for CheckResult {
    fn from(failure: LocateFailure) -> Self {
        let message = match failure {
            LocateFailure::ReplicationGroupNotFound => "Replication group not found.",
            LocateFailure::NodeGroupNotFound => "Node group not found.",
            LocateFailure::NodeNotFound => "Node not found.",
        };
        CheckResult::Unknown(message.to_string())
    }
}

/// Locate the target node and classify its role
pub fn run_check(topology: &Topology, target: &CheckTarget, severity: &Severity) -> CheckResult {
    match locate(topology, target) {
        Ok(node) => evaluate(node, target, severity),
        Err(failure) => failure.into(),
    }
}
