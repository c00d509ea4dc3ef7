// Accumulates per-test results for reporters that only write once the run is over

use std::time::Instant;

use crate::state::{
    AssertionStats, Counts, Failure, TestCaseInfo, TestCaseStats, TestResult, TestResults,
    TestRunStats, Totals,
};

#[derive(Debug, Default)]
pub struct ResultCollector {
    results: TestResults,
    failures: Vec<Failure>,
    started: Option<Instant>,
}

impl ResultCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget anything collected so far and restart the run clock
    pub fn test_run_starting(&mut self) {
        *self = Self::default();
    }

    pub fn test_case_starting(&mut self) {
        self.failures.clear();
        self.started = Some(Instant::now());
    }

    pub fn assertion_ended(&mut self, stats: &AssertionStats) {
        if !stats.outcome.is_ok() {
            self.failures.push(Failure::from_assertion(stats));
        }
    }

    pub fn test_case_ended(&mut self, stats: &TestCaseStats) {
        let duration_ms = self
            .started
            .take()
            .map(|start| start.elapsed().as_millis() as u64)
            .unwrap_or(0);
        let failures = std::mem::take(&mut self.failures);
        self.results
            .add(TestResult::from_stats(stats, duration_ms, failures));
    }

    /// Record a test that was matched but never ran
    pub fn skip_test(&mut self, info: &TestCaseInfo) {
        let stats = TestCaseStats {
            info: info.clone(),
            totals: Totals {
                assertions: Counts::default(),
                test_cases: Counts {
                    skipped: 1,
                    ..Counts::default()
                },
            },
            std_out: String::new(),
            std_err: String::new(),
            aborting: false,
        };
        self.results.add(TestResult::from_stats(&stats, 0, Vec::new()));
    }

    /// Close the run and hand back everything collected
    pub fn finish(&mut self, stats: &TestRunStats) -> &TestResults {
        self.results.run_name = stats.info.name.clone();
        self.results.metrics.finish();
        &self.results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{AssertionInfo, AssertionOutcome, SourceLineInfo, TestRunInfo, TestStatus};

    #[test]
    fn test_collects_failures_per_test() {
        let mut collector = ResultCollector::new();
        let info = TestCaseInfo::new("broken", "", SourceLineInfo::new("b.rs", 1));

        collector.test_case_starting();
        collector.assertion_ended(&AssertionStats {
            info: AssertionInfo::new("CHECK", "x", SourceLineInfo::new("b.rs", 2)),
            outcome: AssertionOutcome::Failed,
            expanded: None,
            message: Some("x was false".to_string()),
            totals: Totals::default(),
        });
        collector.test_case_ended(&TestCaseStats {
            info: info.clone(),
            totals: Totals {
                assertions: Counts {
                    failed: 1,
                    ..Counts::default()
                },
                test_cases: Counts {
                    failed: 1,
                    ..Counts::default()
                },
            },
            std_out: String::new(),
            std_err: String::new(),
            aborting: false,
        });
        collector.skip_test(&info);

        let results = collector.finish(&TestRunStats {
            info: TestRunInfo::new("run"),
            totals: Totals::default(),
            aborting: false,
        });

        assert_eq!(results.run_name, "run");
        assert_eq!(results.total(), 2);
        assert_eq!(results.all()[0].status, TestStatus::Fail);
        assert_eq!(results.all()[0].error_message(), Some("x was false"));
        assert_eq!(results.all()[1].status, TestStatus::Skip);
    }

    #[test]
    fn test_run_clock_starts_with_the_run() {
        let mut collector = ResultCollector::new();
        std::thread::sleep(std::time::Duration::from_millis(20));
        let before_run = chrono::Utc::now();

        collector.test_run_starting();
        let results = collector.finish(&TestRunStats {
            info: TestRunInfo::new("run"),
            totals: Totals::default(),
            aborting: false,
        });

        assert!(results.metrics.started_at >= before_run);
        assert!(results.metrics.total_duration_ms < 20);
    }
}
