// Serializable run events, as written by the stream reporter and fed back by `replay`

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::EventSink;
use crate::state::{
    AssertionInfo, AssertionStats, SectionInfo, SectionStats, TestCaseInfo, TestCaseStats,
    TestRunInfo, TestRunStats,
};

/// One lifecycle event, mirroring the hooks of [`EventSink`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    TestRunStarting(TestRunInfo),
    TestCaseStarting(TestCaseInfo),
    SectionStarting(SectionInfo),
    AssertionStarting(AssertionInfo),
    AssertionEnded(AssertionStats),
    SectionEnded(SectionStats),
    TestCaseEnded(TestCaseStats),
    SkipTest(TestCaseInfo),
    TestRunEnded(TestRunStats),
    NoMatchingTestCases { spec: String },
    ReportInvalidTestSpec { spec: String },
    FatalErrorEncountered { message: String },
}

impl Event {
    /// Deliver the event to the matching hook of `sink`
    pub fn dispatch(&self, sink: &mut dyn EventSink) -> Result<()> {
        match self {
            Event::TestRunStarting(info) => sink.test_run_starting(info),
            Event::TestCaseStarting(info) => sink.test_case_starting(info),
            Event::SectionStarting(info) => sink.section_starting(info),
            Event::AssertionStarting(info) => sink.assertion_starting(info),
            Event::AssertionEnded(stats) => sink.assertion_ended(stats),
            Event::SectionEnded(stats) => sink.section_ended(stats),
            Event::TestCaseEnded(stats) => sink.test_case_ended(stats),
            Event::SkipTest(info) => sink.skip_test(info),
            Event::TestRunEnded(stats) => sink.test_run_ended(stats),
            Event::NoMatchingTestCases { spec } => sink.no_matching_test_cases(spec),
            Event::ReportInvalidTestSpec { spec } => sink.report_invalid_test_spec(spec),
            Event::FatalErrorEncountered { message } => sink.fatal_error_encountered(message),
        }
    }

    /// Snake-case name of the hook this event maps to
    pub fn name(&self) -> &'static str {
        match self {
            Event::TestRunStarting(_) => "test_run_starting",
            Event::TestCaseStarting(_) => "test_case_starting",
            Event::SectionStarting(_) => "section_starting",
            Event::AssertionStarting(_) => "assertion_starting",
            Event::AssertionEnded(_) => "assertion_ended",
            Event::SectionEnded(_) => "section_ended",
            Event::TestCaseEnded(_) => "test_case_ended",
            Event::SkipTest(_) => "skip_test",
            Event::TestRunEnded(_) => "test_run_ended",
            Event::NoMatchingTestCases { .. } => "no_matching_test_cases",
            Event::ReportInvalidTestSpec { .. } => "report_invalid_test_spec",
            Event::FatalErrorEncountered { .. } => "fatal_error_encountered",
        }
    }
}

/// One line of an event stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub event: Event,
}

impl EventRecord {
    pub fn now(event: Event) -> Self {
        Self {
            timestamp: Utc::now(),
            event,
        }
    }
}
