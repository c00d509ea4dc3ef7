// JUnit reporter - outputs test results in JUnit XML format

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use super::collector::ResultCollector;
use super::error::ReportError;
use super::registry::RegisteredReporter;
use super::{EventSink, ListingOutput, OutputStream, ReporterConfig, ReporterPreferences};
use crate::config::RunConfig;
use crate::state::{
    AssertionStats, TestCaseInfo, TestCaseStats, TestResult, TestResults, TestRunInfo,
    TestRunStats, TestStatus,
};

/// Escape text for use in XML attributes and character data
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn class_name(result: &TestResult, run_name: &str) -> String {
    if !result.class_name.is_empty() {
        return result.class_name.clone();
    }
    Path::new(&result.file)
        .file_stem()
        .map(|s| format!("{}.{}", run_name, s.to_string_lossy()))
        .unwrap_or_else(|| run_name.to_string())
}

fn seconds(ms: u64) -> f64 {
    ms as f64 / 1000.0
}

/// JUnit reporter
pub struct JunitReporter {
    stream: OutputStream,
    config: Arc<RunConfig>,
    collector: ResultCollector,
}

impl JunitReporter {
    pub fn new(config: ReporterConfig) -> Self {
        Self {
            stream: config.stream,
            config: config.run,
            collector: ResultCollector::new(),
        }
    }

    fn render(results: &TestResults) -> String {
        let metrics = results.metrics();
        let run_name = escape_xml(&results.run_name);
        // A failed test counts once, as an error if any of its assertions errored
        let errors = results.all().iter().filter(|r| r.errored()).count();
        let failures = results.failed() - errors;

        let mut xml = String::new();
        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str(&format!(
            "<testsuites name=\"{}\" time=\"{:.3}\" tests=\"{}\" failures=\"{}\" errors=\"{}\" skipped=\"{}\">\n",
            run_name,
            seconds(metrics.total_duration_ms),
            results.total(),
            failures,
            errors,
            results.skipped()
        ));
        xml.push_str(&format!(
            "  <testsuite name=\"{}\" time=\"{:.3}\" tests=\"{}\" failures=\"{}\" errors=\"{}\" skipped=\"{}\" timestamp=\"{}\">\n",
            run_name,
            seconds(metrics.total_duration_ms),
            results.total(),
            failures,
            errors,
            results.skipped(),
            metrics.started_at.format("%Y-%m-%dT%H:%M:%SZ")
        ));

        for result in results.all() {
            xml.push_str(&format!(
                "    <testcase name=\"{}\" classname=\"{}\" time=\"{:.3}\">\n",
                escape_xml(&result.name),
                escape_xml(&class_name(result, &results.run_name)),
                seconds(result.duration_ms)
            ));

            match result.status {
                TestStatus::Fail => {
                    if result.failures.is_empty() {
                        xml.push_str(
                            "      <failure message=\"Test failed\" type=\"AssertionError\" />\n",
                        );
                    }
                    for failure in &result.failures {
                        let kind = if failure.errored { "error" } else { "failure" };
                        xml.push_str(&format!(
                            "      <{kind} message=\"{}\" type=\"{}\">{}\nat {}</{kind}>\n",
                            escape_xml(&failure.message),
                            escape_xml(&failure.expression),
                            escape_xml(&failure.message),
                            escape_xml(&failure.location),
                        ));
                    }
                }
                TestStatus::Skip => {
                    xml.push_str("      <skipped message=\"Test skipped\" />\n");
                }
                TestStatus::Pass => {}
            }

            if !result.std_out.is_empty() {
                xml.push_str(&format!(
                    "      <system-out>{}</system-out>\n",
                    escape_xml(result.std_out.trim_end())
                ));
            }
            if !result.std_err.is_empty() {
                xml.push_str(&format!(
                    "      <system-err>{}</system-err>\n",
                    escape_xml(result.std_err.trim_end())
                ));
            }

            xml.push_str("    </testcase>\n");
        }

        xml.push_str("  </testsuite>\n");
        xml.push_str("</testsuites>\n");
        xml
    }
}

impl RegisteredReporter for JunitReporter {
    fn description() -> String {
        "Reports test results in an XML format that looks like Ant's junitreport target"
            .to_string()
    }

    fn from_config(config: ReporterConfig) -> Result<Self, ReportError> {
        Ok(Self::new(config))
    }
}

impl EventSink for JunitReporter {
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
        let xml = Self::render(self.collector.finish(stats));
        self.stream
            .write_all(xml.as_bytes())
            .context("Failed to write JUnit XML content")?;
        self.stream.flush()?;
        Ok(())
    }

    fn listing_output(&mut self) -> Option<ListingOutput<'_>> {
        Some(ListingOutput {
            out: &mut self.stream,
            config: &self.config,
        })
    }
}
