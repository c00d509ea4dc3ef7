//! Fan-out of run events to every attached listener and reporter.
//!
//! Listeners and reporters live in two separate sequences. Every event goes
//! to all listeners in the order they were added, then to all reporters in
//! the order they were added, however the `add_*` calls were interleaved.
//!
//! There is no isolation between sinks: the first hook that fails stops the
//! dispatch of that event, and its error is returned to the caller.

use anyhow::Result;

use super::{EventSink, ListenerDescription, ReporterDescription, ReporterPreferences};
use crate::state::{
    AssertionInfo, AssertionStats, SectionInfo, SectionStats, TagInfo, TestCaseInfo,
    TestCaseStats, TestRunInfo, TestRunStats,
};

/// Composite sink owning every listener and reporter of one run
#[derive(Default)]
pub struct MultiSink {
    listeners: Vec<Box<dyn EventSink>>,
    reporters: Vec<Box<dyn EventSink>>,
    preferences: ReporterPreferences,
}

impl MultiSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&mut self, listener: Box<dyn EventSink>) {
        self.listeners.push(listener);
        self.update_preferences();
    }

    pub fn add_reporter(&mut self, reporter: Box<dyn EventSink>) {
        self.reporters.push(reporter);
        self.update_preferences();
    }

    /// Aggregate of every held sink's preferences
    pub fn preferences(&self) -> ReporterPreferences {
        self.preferences
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn reporter_count(&self) -> usize {
        self.reporters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty() && self.reporters.is_empty()
    }

    fn update_preferences(&mut self) {
        self.preferences = self
            .listeners
            .iter()
            .chain(self.reporters.iter())
            .map(|sink| sink.preferences())
            .collect();
    }

    fn for_each_sink(&mut self, mut hook: impl FnMut(&mut dyn EventSink) -> Result<()>) -> Result<()> {
        for sink in self.listeners.iter_mut().chain(self.reporters.iter_mut()) {
            hook(sink.as_mut())?;
        }
        Ok(())
    }
}

impl EventSink for MultiSink {
    fn preferences(&self) -> ReporterPreferences {
        self.preferences
    }

    fn test_run_starting(&mut self, info: &TestRunInfo) -> Result<()> {
        self.for_each_sink(|sink| sink.test_run_starting(info))
    }

    fn test_case_starting(&mut self, info: &TestCaseInfo) -> Result<()> {
        self.for_each_sink(|sink| sink.test_case_starting(info))
    }

    fn section_starting(&mut self, info: &SectionInfo) -> Result<()> {
        self.for_each_sink(|sink| sink.section_starting(info))
    }

    fn assertion_starting(&mut self, info: &AssertionInfo) -> Result<()> {
        self.for_each_sink(|sink| sink.assertion_starting(info))
    }

    fn assertion_ended(&mut self, stats: &AssertionStats) -> Result<()> {
        self.for_each_sink(|sink| sink.assertion_ended(stats))
    }

    fn section_ended(&mut self, stats: &SectionStats) -> Result<()> {
        self.for_each_sink(|sink| sink.section_ended(stats))
    }

    fn test_case_ended(&mut self, stats: &TestCaseStats) -> Result<()> {
        self.for_each_sink(|sink| sink.test_case_ended(stats))
    }

    fn skip_test(&mut self, info: &TestCaseInfo) -> Result<()> {
        self.for_each_sink(|sink| sink.skip_test(info))
    }

    fn test_run_ended(&mut self, stats: &TestRunStats) -> Result<()> {
        self.for_each_sink(|sink| sink.test_run_ended(stats))
    }

    fn no_matching_test_cases(&mut self, spec: &str) -> Result<()> {
        self.for_each_sink(|sink| sink.no_matching_test_cases(spec))
    }

    fn report_invalid_test_spec(&mut self, spec: &str) -> Result<()> {
        self.for_each_sink(|sink| sink.report_invalid_test_spec(spec))
    }

    fn fatal_error_encountered(&mut self, message: &str) -> Result<()> {
        self.for_each_sink(|sink| sink.fatal_error_encountered(message))
    }

    fn list_tags(&mut self, tags: &[TagInfo]) -> Result<()> {
        self.for_each_sink(|sink| sink.list_tags(tags))
    }

    fn list_reporters(&mut self, descriptions: &[ReporterDescription]) -> Result<()> {
        self.for_each_sink(|sink| sink.list_reporters(descriptions))
    }

    fn list_listeners(&mut self, descriptions: &[ListenerDescription]) -> Result<()> {
        self.for_each_sink(|sink| sink.list_listeners(descriptions))
    }

    fn list_tests(&mut self, tests: &[TestCaseInfo]) -> Result<()> {
        self.for_each_sink(|sink| sink.list_tests(tests))
    }
}
