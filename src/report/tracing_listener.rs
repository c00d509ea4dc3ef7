// Tracing listener - mirrors run events into the log

use anyhow::Result;
use tracing::{debug, error, info, warn};

use super::error::ReportError;
use super::registry::RegisteredListener;
use super::{EventSink, ReporterConfig};
use crate::state::{
    AssertionStats, SectionInfo, SectionStats, TestCaseInfo, TestCaseStats, TestRunInfo,
    TestRunStats,
};

/// Listener that mirrors run events into `tracing`
#[derive(Debug, Default)]
pub struct TracingListener;

impl RegisteredListener for TracingListener {
    fn name() -> String {
        "tracing".to_string()
    }

    fn description() -> String {
        "Logs every run event through the tracing subscriber".to_string()
    }

    fn from_config(_config: ReporterConfig) -> Result<Self, ReportError> {
        Ok(Self)
    }
}

impl EventSink for TracingListener {
    fn test_run_starting(&mut self, info: &TestRunInfo) -> Result<()> {
        info!("Test run '{}' starting", info.name);
        Ok(())
    }

    fn test_case_starting(&mut self, info: &TestCaseInfo) -> Result<()> {
        debug!("Test case '{}' starting ({})", info.name, info.source);
        Ok(())
    }

    fn section_starting(&mut self, info: &SectionInfo) -> Result<()> {
        debug!("Section '{}' starting", info.name);
        Ok(())
    }

    fn assertion_ended(&mut self, stats: &AssertionStats) -> Result<()> {
        if !stats.outcome.is_ok() {
            warn!(
                "{}( {} ) failed at {}",
                stats.info.macro_name, stats.info.expression, stats.info.source
            );
        }
        Ok(())
    }

    fn section_ended(&mut self, stats: &SectionStats) -> Result<()> {
        debug!(
            "Section '{}' ended: {} passed, {} failed",
            stats.info.name, stats.assertions.passed, stats.assertions.failed
        );
        Ok(())
    }

    fn test_case_ended(&mut self, stats: &TestCaseStats) -> Result<()> {
        debug!(
            "Test case '{}' ended ({})",
            stats.info.name,
            if stats.passed() { "passed" } else { "failed" }
        );
        Ok(())
    }

    fn skip_test(&mut self, info: &TestCaseInfo) -> Result<()> {
        debug!("Test case '{}' skipped", info.name);
        Ok(())
    }

    fn test_run_ended(&mut self, stats: &TestRunStats) -> Result<()> {
        info!(
            "Test run '{}' ended: {} test cases, {} failed",
            stats.info.name,
            stats.totals.test_cases.total(),
            stats.totals.test_cases.failed
        );
        Ok(())
    }

    fn no_matching_test_cases(&mut self, spec: &str) -> Result<()> {
        warn!("No test cases matched '{}'", spec);
        Ok(())
    }

    fn report_invalid_test_spec(&mut self, spec: &str) -> Result<()> {
        warn!("Invalid test spec '{}'", spec);
        Ok(())
    }

    fn fatal_error_encountered(&mut self, message: &str) -> Result<()> {
        error!("Fatal error: {}", message);
        Ok(())
    }
}
