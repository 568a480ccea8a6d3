use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

/// A single reportable finding. Accumulated, never thrown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    /// 1-based source line the issue was detected on.
    pub line: usize,
    pub message: String,
}

impl ValidationIssue {
    pub fn error(line: usize, message: impl Into<String>) -> Self {
        ValidationIssue {
            severity: Severity::Error,
            line,
            message: message.into(),
        }
    }

    pub fn warning(line: usize, message: impl Into<String>) -> Self {
        ValidationIssue {
            severity: Severity::Warning,
            line,
            message: message.into(),
        }
    }
}

/// Aggregated result of validating a file set.
///
/// Zero matching files reports all-zero counts and is success, not failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationSummary {
    pub files: usize,
    pub errors: usize,
    pub warnings: usize,
}

impl ValidationSummary {
    pub fn is_success(&self) -> bool {
        self.errors == 0
    }
}
