// State module - event payloads and result accumulation

pub mod info;
pub mod metrics;
pub mod result;
pub mod stats;
pub mod tags;

pub use info::{AssertionInfo, SectionInfo, SourceLineInfo, TestCaseInfo, TestRunInfo};
pub use metrics::ExecutionMetrics;
pub use result::{Failure, TestResult};
pub use stats::{
    AssertionOutcome, AssertionStats, Counts, SectionStats, TestCaseStats, TestRunStats, Totals,
};
pub use tags::{TagInfo, collect_tags, parse_tags};

use serde::Serialize;

/// Results collected over one run, for reporters that write everything at the end
#[derive(Debug, Clone, Serialize)]
pub struct TestResults {
    pub run_name: String,
    total: usize,
    passed: usize,
    failed: usize,
    skipped: usize,
    results: Vec<TestResult>,
    pub metrics: ExecutionMetrics,
}

impl Default for TestResults {
    fn default() -> Self {
        Self::new()
    }
}

impl TestResults {
    /// Create new test results
    pub fn new() -> Self {
        Self {
            run_name: String::new(),
            total: 0,
            passed: 0,
            failed: 0,
            skipped: 0,
            results: Vec::new(),
            metrics: ExecutionMetrics::default(),
        }
    }

    /// Add a test result
    pub fn add(&mut self, result: TestResult) {
        self.total += 1;

        match result.status {
            TestStatus::Pass => self.passed += 1,
            TestStatus::Fail => self.failed += 1,
            TestStatus::Skip => self.skipped += 1,
        }

        self.results.push(result);
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn passed(&self) -> usize {
        self.passed
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Get all results
    pub fn all(&self) -> &[TestResult] {
        &self.results
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    pub fn metrics(&self) -> &ExecutionMetrics {
        &self.metrics
    }
}

/// Test status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Pass,
    Fail,
    Skip,
}
