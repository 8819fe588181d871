//! Check output and exit codes
//!
//! Follows the Sensu plugin convention: one line on stdout of the form
//! `<CheckName> <STATUS>: <message>` and exit code 0/1/2/3 for
//! OK/WARNING/CRITICAL/UNKNOWN.

use std::fmt;

use tracing::warn;

use crate::check::{CheckResult, Severity};

/// Name printed in front of every result line
pub const CHECK_NAME: &str = "CheckElastiCacheFailover";

/// Final status of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Ok,
    Warning,
    Critical,
    Unknown,
    /// Operator-supplied severity with no standard meaning; exits as critical
    Custom(String),
}

impl Status {
    /// Map an alert severity token to a status, ignoring ASCII case
    pub fn from_severity(severity: &Severity) -> Self {
        let token = severity.as_str();
        if token.eq_ignore_ascii_case("ok") {
            Status::Ok
        } else if token.eq_ignore_ascii_case("warning") {
            Status::Warning
        } else if token.eq_ignore_ascii_case("critical") {
            Status::Critical
        } else if token.eq_ignore_ascii_case("unknown") {
            Status::Unknown
        } else {
            warn!(severity = %token, "Unrecognized severity, exiting as critical");
            Status::Custom(token.to_string())
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Status::Ok => 0,
            Status::Warning => 1,
            Status::Critical | Status::Custom(_) => 2,
            Status::Unknown => 3,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ok => f.write_str("OK"),
            Status::Warning => f.write_str("WARNING"),
            Status::Critical => f.write_str("CRITICAL"),
            Status::Unknown => f.write_str("UNKNOWN"),
            Status::Custom(label) => f.write_str(&label.to_ascii_uppercase()),
        }
    }
}

/// A result ready to be printed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub status: Status,
    pub message: String,
}

impl Report {
    /// Unknown result for errors raised outside the check itself
    ///
    /// Multi-line error text is folded onto one line.
    pub fn unknown(message: &str) -> Self {
        let message = message
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        Report {
            status: Status::Unknown,
            message,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.status.exit_code()
    }
}

impl From<CheckResult> for Report {
    fn from(result: CheckResult) -> Self {
        match result {
            CheckResult::Healthy(message) => Report {
                status: Status::Ok,
                message,
            },
            CheckResult::Alert(severity, message) => Report {
                status: Status::from_severity(&severity),
                message,
            },
            CheckResult::Unknown(message) => Report {
                status: Status::Unknown,
                message,
            },
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", CHECK_NAME, self.status, self.message)
    }
}
