// Shared fixtures for integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use anyhow::Result;
use reporthub::config::RunConfig;
use reporthub::report::{
    EventSink, OutputStream, ReporterConfig, ReporterPreferences, SharedBuffer,
};
use reporthub::state::{
    AssertionInfo, AssertionOutcome, AssertionStats, Counts, SectionInfo, SectionStats,
    SourceLineInfo, TestCaseInfo, TestCaseStats, TestRunInfo, TestRunStats, Totals,
};
use reporthub::report::Event;

pub type Recorder = Arc<Mutex<Vec<String>>>;

pub fn recorder() -> Recorder {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn recorded(recorder: &Recorder) -> Vec<String> {
    recorder.lock().unwrap().clone()
}

/// Reporter config writing into a fresh buffer, colour off
pub fn buffer_config() -> (ReporterConfig, SharedBuffer) {
    let buffer = SharedBuffer::new();
    let run = RunConfig {
        colour: false,
        ..RunConfig::default()
    };
    (ReporterConfig::new(Arc::new(run), buffer.stream()), buffer)
}

pub fn config_with(run: RunConfig) -> (ReporterConfig, SharedBuffer) {
    let buffer = SharedBuffer::new();
    (ReporterConfig::new(Arc::new(run), buffer.stream()), buffer)
}

/// Records its witness string when a run starts
pub struct WitnessSink {
    witness: String,
    recorder: Recorder,
    preferences: ReporterPreferences,
}

impl WitnessSink {
    pub fn new(witness: &str, recorder: &Recorder) -> Self {
        Self {
            witness: witness.to_string(),
            recorder: recorder.clone(),
            preferences: ReporterPreferences::default(),
        }
    }

    pub fn with_preferences(redirect: bool, all_assertions: bool) -> Self {
        Self {
            witness: String::new(),
            recorder: recorder(),
            preferences: ReporterPreferences {
                should_redirect_std_out: redirect,
                should_report_all_assertions: all_assertions,
            },
        }
    }
}

impl EventSink for WitnessSink {
    fn preferences(&self) -> ReporterPreferences {
        self.preferences
    }

    fn test_run_starting(&mut self, _info: &TestRunInfo) -> Result<()> {
        self.recorder.lock().unwrap().push(self.witness.clone());
        Ok(())
    }
}

/// Fails every run start with its name
pub struct FailingSink(pub String);

impl EventSink for FailingSink {
    fn test_run_starting(&mut self, _info: &TestRunInfo) -> Result<()> {
        anyhow::bail!("{} refused to start", self.0)
    }
}

/// Writes to a stream on listing calls via the default helpers
pub struct ListingSink {
    pub stream: OutputStream,
    pub config: Arc<RunConfig>,
}

impl EventSink for ListingSink {
    fn listing_output(&mut self) -> Option<reporthub::report::ListingOutput<'_>> {
        Some(reporthub::report::ListingOutput {
            out: &mut self.stream,
            config: &self.config,
        })
    }
}

pub fn source(line: u64) -> SourceLineInfo {
    SourceLineInfo::new("sample.rs", line)
}

fn counts(passed: u64, failed: u64, skipped: u64) -> Counts {
    Counts {
        passed,
        failed,
        skipped,
        ..Counts::default()
    }
}

/// A small run: one passing test, one failing test with a section, one skipped test
pub fn sample_run() -> Vec<Event> {
    let passing = TestCaseInfo::new("adds numbers", "[math][fast]", source(10));
    let failing = TestCaseInfo::new("divides <numbers> & \"more\"", "[math]", source(20));
    let skipped = TestCaseInfo::new("talks to network", "[net]", source(30));

    let ok_assertion = AssertionStats {
        info: AssertionInfo::new("REQUIRE", "1 + 1 == 2", source(11)),
        outcome: AssertionOutcome::Passed,
        expanded: Some("2 == 2".to_string()),
        message: None,
        totals: Totals::default(),
    };
    let bad_assertion = AssertionStats {
        info: AssertionInfo::new("CHECK", "a / b == 3", source(22)),
        outcome: AssertionOutcome::Failed,
        expanded: Some("2 == 3".to_string()),
        message: None,
        totals: Totals::default(),
    };
    let section = SectionInfo::new("by two", source(21));

    vec![
        Event::TestRunStarting(TestRunInfo::new("sample")),
        Event::TestCaseStarting(passing.clone()),
        Event::AssertionStarting(ok_assertion.info.clone()),
        Event::AssertionEnded(ok_assertion),
        Event::TestCaseEnded(TestCaseStats {
            info: passing,
            totals: Totals {
                assertions: counts(1, 0, 0),
                test_cases: counts(1, 0, 0),
            },
            std_out: "hello from test\n".to_string(),
            std_err: String::new(),
            aborting: false,
        }),
        Event::TestCaseStarting(failing.clone()),
        Event::SectionStarting(section.clone()),
        Event::AssertionStarting(bad_assertion.info.clone()),
        Event::AssertionEnded(bad_assertion),
        Event::SectionEnded(SectionStats {
            info: section,
            assertions: counts(0, 1, 0),
            duration_secs: 0.25,
            missing_assertions: false,
        }),
        Event::TestCaseEnded(TestCaseStats {
            info: failing,
            totals: Totals {
                assertions: counts(0, 1, 0),
                test_cases: counts(0, 1, 0),
            },
            std_out: String::new(),
            std_err: String::new(),
            aborting: false,
        }),
        Event::SkipTest(skipped),
        Event::TestRunEnded(TestRunStats {
            info: TestRunInfo::new("sample"),
            totals: Totals {
                assertions: counts(1, 1, 0),
                test_cases: counts(1, 1, 1),
            },
            aborting: false,
        }),
    ]
}

pub fn drive(sink: &mut dyn EventSink, events: &[Event]) -> Result<()> {
    for event in events {
        event.dispatch(sink)?;
    }
    Ok(())
}
