// Per-test results as accumulated by file reporters

use crate::state::{AssertionOutcome, AssertionStats, TestCaseStats, TestStatus};
use serde::Serialize;

/// A recorded assertion failure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Failure {
    pub expression: String,
    pub message: String,
    pub location: String,
    pub errored: bool,
}

impl Failure {
    pub fn from_assertion(stats: &AssertionStats) -> Self {
        let expression = stats
            .expanded
            .clone()
            .unwrap_or_else(|| stats.info.expression.clone());
        let message = stats
            .message
            .clone()
            .unwrap_or_else(|| format!("{}( {} )", stats.info.macro_name, expression));

        Self {
            expression,
            message,
            location: stats.info.source.to_string(),
            errored: stats.outcome == AssertionOutcome::Errored,
        }
    }
}

/// Test result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestResult {
    pub name: String,
    pub class_name: String,
    pub tags: Vec<String>,
    pub file: String,
    pub line: u64,
    pub status: TestStatus,
    pub duration_ms: u64,
    pub assertions: u64,
    pub failures: Vec<Failure>,
    pub std_out: String,
    pub std_err: String,
}

impl TestResult {
    /// Build a result from the end-of-test stats plus what the reporter saw along the way
    pub fn from_stats(stats: &TestCaseStats, duration_ms: u64, failures: Vec<Failure>) -> Self {
        let totals = &stats.totals;
        let status = if !stats.passed() {
            TestStatus::Fail
        } else if totals.test_cases.skipped > 0 || totals.assertions.skipped > 0 {
            TestStatus::Skip
        } else {
            TestStatus::Pass
        };

        Self {
            name: stats.info.name.clone(),
            class_name: stats.info.class_name.clone(),
            tags: stats.info.tags.iter().cloned().collect(),
            file: stats.info.source.file.clone(),
            line: stats.info.source.line,
            status,
            duration_ms,
            assertions: totals.assertions.total(),
            failures,
            std_out: stats.std_out.clone(),
            std_err: stats.std_err.clone(),
        }
    }

    /// First failure message, if any
    pub fn error_message(&self) -> Option<&str> {
        self.failures.first().map(|f| f.message.as_str())
    }

    /// Failed because an assertion errored rather than evaluated false
    pub fn errored(&self) -> bool {
        self.status == TestStatus::Fail && self.failures.iter().any(|f| f.errored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{AssertionInfo, Counts, SourceLineInfo, TestCaseInfo, Totals};

    fn stats(assertions: Counts, test_cases: Counts) -> TestCaseStats {
        TestCaseStats {
            info: TestCaseInfo::new("sample", "[unit]", SourceLineInfo::new("s.rs", 7)),
            totals: Totals {
                assertions,
                test_cases,
            },
            std_out: String::new(),
            std_err: String::new(),
            aborting: false,
        }
    }

    #[test]
    fn test_result_pass() {
        let result = TestResult::from_stats(
            &stats(
                Counts {
                    passed: 2,
                    ..Counts::default()
                },
                Counts {
                    passed: 1,
                    ..Counts::default()
                },
            ),
            12,
            Vec::new(),
        );
        assert_eq!(result.name, "sample");
        assert_eq!(result.status, TestStatus::Pass);
        assert_eq!(result.assertions, 2);
        assert_eq!(result.line, 7);
        assert!(result.error_message().is_none());
    }

    #[test]
    fn test_result_fail() {
        let assertion = AssertionStats {
            info: AssertionInfo::new("REQUIRE", "a == b", SourceLineInfo::new("s.rs", 9)),
            outcome: AssertionOutcome::Failed,
            expanded: Some("1 == 2".to_string()),
            message: None,
            totals: Totals::default(),
        };
        let result = TestResult::from_stats(
            &stats(
                Counts {
                    failed: 1,
                    ..Counts::default()
                },
                Counts {
                    failed: 1,
                    ..Counts::default()
                },
            ),
            3,
            vec![Failure::from_assertion(&assertion)],
        );
        assert_eq!(result.status, TestStatus::Fail);
        assert_eq!(result.error_message(), Some("REQUIRE( 1 == 2 )"));
        assert_eq!(result.failures[0].location, "s.rs:9");
        assert!(!result.errored());
    }

    #[test]
    fn test_result_errored() {
        let assertion = AssertionStats {
            info: AssertionInfo::new("REQUIRE", "parse()", SourceLineInfo::new("s.rs", 11)),
            outcome: AssertionOutcome::Errored,
            expanded: None,
            message: Some("unexpected exception".to_string()),
            totals: Totals::default(),
        };
        let failure = Failure::from_assertion(&assertion);
        let result = TestResult::from_stats(
            &stats(
                Counts {
                    failed: 1,
                    ..Counts::default()
                },
                Counts {
                    failed: 1,
                    ..Counts::default()
                },
            ),
            1,
            vec![failure],
        );
        assert!(result.failures[0].errored);
        assert!(result.errored());
    }

    #[test]
    fn test_result_skip() {
        let result = TestResult::from_stats(
            &stats(
                Counts::default(),
                Counts {
                    skipped: 1,
                    ..Counts::default()
                },
            ),
            0,
            Vec::new(),
        );
        assert_eq!(result.status, TestStatus::Skip);
    }
}
