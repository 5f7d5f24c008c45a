use crate::time::clock::Elapsed;
use std::fmt;

/// One failed check reported by a running node. Display only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureRecord {
    pub condition: String,
    pub actual: String,
    pub limit: String,
    pub message: String,
    pub file: String,
    pub line: u32,
}

impl FailureRecord {
    pub fn new<C, A, L, M, F>(condition: C, actual: A, limit: L, message: M, file: F, line: u32) -> Self
    where
        C: Into<String>,
        A: Into<String>,
        L: Into<String>,
        M: Into<String>,
        F: Into<String>,
    {
        Self {
            condition: condition.into(),
            actual: actual.into(),
            limit: limit.into(),
            message: message.into(),
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for FailureRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "    test=\"{}\" actual=\"{}\" limit=\"{}\" in=\"{}:{}\" {}",
            self.condition, self.actual, self.limit, self.file, self.line, self.message
        )
    }
}

/// Outcome of a single node run.
#[derive(Debug, Clone, Default)]
pub struct TestResult {
    pub elapsed: Elapsed,
    pub failures: Vec<FailureRecord>,
    /// Set by descendants when they report a failure.
    pub children_failed: bool,
}

impl TestResult {
    pub fn is_failed(&self) -> bool {
        self.children_failed || !self.failures.is_empty()
    }

    /// Only looks at this node's own failures.
    pub fn is_status_success(&self) -> bool {
        self.failures.is_empty()
    }
}
