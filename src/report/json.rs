// JSON reporter - writes the whole run as one JSON document

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::json;

use super::collector::ResultCollector;
use super::error::ReportError;
use super::registry::RegisteredReporter;
use super::{
    EventSink, ListenerDescription, OutputStream, ReporterConfig, ReporterDescription,
    ReporterPreferences,
};
use crate::config::RunConfig;
use crate::state::{
    AssertionStats, TagInfo, TestCaseInfo, TestCaseStats, TestResults, TestRunInfo,
    TestRunStats, Totals,
};

#[derive(Serialize)]
struct JsonReport<'a> {
    run: &'a str,
    totals: &'a Totals,
    aborting: bool,
    results: &'a TestResults,
}

/// A tag as listed in JSON, bracketed spelling alongside the bare name
pub(super) fn listed_tag(tag: &TagInfo) -> serde_json::Value {
    json!({
        "name": tag.name(),
        "tag": format!("[{}]", tag.name()),
        "aliases": tag.aliases().collect::<Vec<_>>(),
        "count": tag.count(),
    })
}

/// A test as listed in JSON, with its tags also as a bracketed spec
#[derive(Serialize)]
pub(super) struct ListedTest<'a> {
    #[serde(flatten)]
    info: &'a TestCaseInfo,
    tag_spec: String,
}

/// Visible tests in listing form
pub(super) fn listed_tests(tests: &[TestCaseInfo], include_hidden: bool) -> Vec<ListedTest<'_>> {
    tests
        .iter()
        .filter(|t| include_hidden || !t.is_hidden())
        .map(|info| ListedTest {
            info,
            tag_spec: info.tags_as_string(),
        })
        .collect()
}

/// JSON reporter
pub struct JsonReporter {
    stream: OutputStream,
    config: Arc<RunConfig>,
    collector: ResultCollector,
}

impl JsonReporter {
    pub fn new(config: ReporterConfig) -> Self {
        Self {
            stream: config.stream,
            config: config.run,
            collector: ResultCollector::new(),
        }
    }

    fn write_value(&mut self, value: &serde_json::Value) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.stream, value)
            .context("Failed to serialize listing to JSON")?;
        writeln!(self.stream)?;
        self.stream.flush()?;
        Ok(())
    }
}

impl RegisteredReporter for JsonReporter {
    fn description() -> String {
        "Outputs a single JSON document describing the run".to_string()
    }

    fn from_config(config: ReporterConfig) -> Result<Self, ReportError> {
        Ok(Self::new(config))
    }
}

impl EventSink for JsonReporter {
    fn preferences(&self) -> ReporterPreferences {
        ReporterPreferences {
            should_redirect_std_out: true,
            should_report_all_assertions: true,
        }
    }

    fn test_run_starting(&mut self, _info: &TestRunInfo) -> Result<()> {
        self.collector.test_run_starting();
        Ok(())
    }

    fn test_case_starting(&mut self, _info: &TestCaseInfo) -> Result<()> {
        self.collector.test_case_starting();
        Ok(())
    }

    fn assertion_ended(&mut self, stats: &AssertionStats) -> Result<()> {
        self.collector.assertion_ended(stats);
        Ok(())
    }

    fn test_case_ended(&mut self, stats: &TestCaseStats) -> Result<()> {
        self.collector.test_case_ended(stats);
        Ok(())
    }

    fn skip_test(&mut self, info: &TestCaseInfo) -> Result<()> {
        self.collector.skip_test(info);
        Ok(())
    }

    fn test_run_ended(&mut self, stats: &TestRunStats) -> Result<()> {
        let results = self.collector.finish(stats);
        let report = JsonReport {
            run: &stats.info.name,
            totals: &stats.totals,
            aborting: stats.aborting,
            results,
        };

        serde_json::to_writer_pretty(&mut self.stream, &report)
            .context("Failed to serialize test results to JSON")?;
        writeln!(self.stream)?;
        self.stream.flush()?;
        Ok(())
    }

    fn list_tags(&mut self, tags: &[TagInfo]) -> Result<()> {
        let tags: Vec<_> = tags.iter().map(listed_tag).collect();
        self.write_value(&json!({ "tags": tags }))
    }

    fn list_reporters(&mut self, descriptions: &[ReporterDescription]) -> Result<()> {
        self.write_value(&json!({ "reporters": descriptions }))
    }

    fn list_listeners(&mut self, descriptions: &[ListenerDescription]) -> Result<()> {
        self.write_value(&json!({ "listeners": descriptions }))
    }

    fn list_tests(&mut self, tests: &[TestCaseInfo]) -> Result<()> {
        let tests = listed_tests(tests, self.config.include_hidden);
        self.write_value(&json!({ "tests": tests }))
    }
}
