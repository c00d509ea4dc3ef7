// Streaming reporter - one JSON record per event, flushed as it happens

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::json;

use super::error::ReportError;
use super::event::{Event, EventRecord};
use super::json::{listed_tag, listed_tests};
use super::registry::RegisteredReporter;
use super::{
    EventSink, ListenerDescription, OutputStream, ReporterConfig, ReporterDescription,
    ReporterPreferences,
};
use crate::config::RunConfig;
use crate::state::{
    AssertionInfo, AssertionStats, SectionInfo, SectionStats, TagInfo, TestCaseInfo,
    TestCaseStats, TestRunInfo, TestRunStats,
};

/// Event kinds written for listing requests; `replay` skips these
pub const LISTING_EVENTS: [&str; 4] = ["list_tags", "list_reporters", "list_listeners", "list_tests"];

pub struct StreamingJsonReporter {
    stream: OutputStream,
    config: Arc<RunConfig>,
}

impl StreamingJsonReporter {
    pub fn new(config: ReporterConfig) -> Self {
        Self {
            stream: config.stream,
            config: config.run,
        }
    }

    fn emit(&mut self, event: Event) -> Result<()> {
        let record = EventRecord::now(event);
        let line = serde_json::to_string(&record)
            .with_context(|| format!("Failed to serialize '{}' event", record.event.name()))?;
        writeln!(self.stream, "{}", line)?;
        self.stream.flush()?;
        Ok(())
    }

    fn emit_listing(&mut self, kind: &str, key: &str, items: serde_json::Value) -> Result<()> {
        let record = json!({
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "event": kind,
            key: items,
        });
        writeln!(self.stream, "{}", record)?;
        self.stream.flush()?;
        Ok(())
    }
}

impl RegisteredReporter for StreamingJsonReporter {
    fn description() -> String {
        "Streams every event as a line of JSON (replayable with `reporthub replay`)".to_string()
    }

    fn from_config(config: ReporterConfig) -> Result<Self, ReportError> {
        Ok(Self::new(config))
    }
}

impl EventSink for StreamingJsonReporter {
    fn preferences(&self) -> ReporterPreferences {
        ReporterPreferences {
            should_redirect_std_out: false,
            should_report_all_assertions: true,
        }
    }

    fn test_run_starting(&mut self, info: &TestRunInfo) -> Result<()> {
        self.emit(Event::TestRunStarting(info.clone()))
    }

    fn test_case_starting(&mut self, info: &TestCaseInfo) -> Result<()> {
        self.emit(Event::TestCaseStarting(info.clone()))
    }

    fn section_starting(&mut self, info: &SectionInfo) -> Result<()> {
        self.emit(Event::SectionStarting(info.clone()))
    }

    fn assertion_starting(&mut self, info: &AssertionInfo) -> Result<()> {
        self.emit(Event::AssertionStarting(info.clone()))
    }

    fn assertion_ended(&mut self, stats: &AssertionStats) -> Result<()> {
        self.emit(Event::AssertionEnded(stats.clone()))
    }

    fn section_ended(&mut self, stats: &SectionStats) -> Result<()> {
        self.emit(Event::SectionEnded(stats.clone()))
    }

    fn test_case_ended(&mut self, stats: &TestCaseStats) -> Result<()> {
        self.emit(Event::TestCaseEnded(stats.clone()))
    }

    fn skip_test(&mut self, info: &TestCaseInfo) -> Result<()> {
        self.emit(Event::SkipTest(info.clone()))
    }

    fn test_run_ended(&mut self, stats: &TestRunStats) -> Result<()> {
        self.emit(Event::TestRunEnded(stats.clone()))
    }

    fn no_matching_test_cases(&mut self, spec: &str) -> Result<()> {
        self.emit(Event::NoMatchingTestCases {
            spec: spec.to_string(),
        })
    }

    fn report_invalid_test_spec(&mut self, spec: &str) -> Result<()> {
        self.emit(Event::ReportInvalidTestSpec {
            spec: spec.to_string(),
        })
    }

    fn fatal_error_encountered(&mut self, message: &str) -> Result<()> {
        self.emit(Event::FatalErrorEncountered {
            message: message.to_string(),
        })
    }

    fn list_tags(&mut self, tags: &[TagInfo]) -> Result<()> {
        let tags: Vec<_> = tags.iter().map(listed_tag).collect();
        self.emit_listing("list_tags", "tags", json!(tags))
    }

    fn list_reporters(&mut self, descriptions: &[ReporterDescription]) -> Result<()> {
        self.emit_listing("list_reporters", "reporters", json!(descriptions))
    }

    fn list_listeners(&mut self, descriptions: &[ListenerDescription]) -> Result<()> {
        self.emit_listing("list_listeners", "listeners", json!(descriptions))
    }

    fn list_tests(&mut self, tests: &[TestCaseInfo]) -> Result<()> {
        let tests = listed_tests(tests, self.config.include_hidden);
        self.emit_listing("list_tests", "tests", json!(tests))
    }
}
