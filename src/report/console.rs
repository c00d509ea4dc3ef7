// Console reporter - human readable progress and summary

use std::io::{self, Write};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;

use super::colour::{Colour, Colorizer};
use super::error::ReportError;
use super::registry::RegisteredReporter;
use super::{EventSink, ListingOutput, OutputStream, ReporterConfig, ReporterPreferences};
use crate::config::{RunConfig, Verbosity};
use crate::state::{
    AssertionOutcome, AssertionStats, SectionInfo, SectionStats, TestCaseInfo, TestCaseStats,
    TestRunInfo, TestRunStats,
};

const HEAVY_RULE: &str =
    "════════════════════════════════════════════════════════════════════════════════";
const LIGHT_RULE: &str =
    "────────────────────────────────────────────────────────────────────────────────";

/// Console reporter
pub struct ConsoleReporter {
    stream: OutputStream,
    config: Arc<RunConfig>,
    colorizer: Colorizer,
    run_started: Option<Instant>,
    test_started: Option<Instant>,
    current_test: Option<String>,
    sections: Vec<String>,
    failed_tests: Vec<String>,
}

impl ConsoleReporter {
    pub fn new(config: ReporterConfig) -> Self {
        let colorizer = Colorizer::new(config.run.colour);
        Self {
            stream: config.stream,
            config: config.run,
            colorizer,
            run_started: None,
            test_started: None,
            current_test: None,
            sections: Vec::new(),
            failed_tests: Vec::new(),
        }
    }

    fn verbose(&self) -> bool {
        self.config.verbosity == Verbosity::High
    }

    fn print_assertion(&mut self, stats: &AssertionStats) -> io::Result<()> {
        let (label, colour) = match stats.outcome {
            AssertionOutcome::Passed => ("PASSED", Colour::Passed),
            AssertionOutcome::Failed => ("FAILED", Colour::Failed),
            AssertionOutcome::Errored => ("ERROR", Colour::Failed),
            AssertionOutcome::Skipped => ("SKIPPED", Colour::Skipped),
            AssertionOutcome::Info => ("INFO", Colour::Secondary),
            AssertionOutcome::Warning => ("WARNING", Colour::Skipped),
        };

        let test = self.current_test.as_deref().unwrap_or("<no test>");
        writeln!(
            self.stream,
            "{} {}: {}",
            self.colorizer.paint(label, colour),
            self.colorizer
                .paint(&stats.info.source.to_string(), Colour::Secondary),
            test
        )?;
        for section in &self.sections {
            writeln!(self.stream, "  in section: {}", section)?;
        }
        if !stats.info.expression.is_empty() {
            writeln!(
                self.stream,
                "  {}( {} )",
                stats.info.macro_name, stats.info.expression
            )?;
        }
        if let Some(expanded) = &stats.expanded
            && *expanded != stats.info.expression
        {
            writeln!(self.stream, "  with expansion: {}", expanded)?;
        }
        if let Some(message) = &stats.message {
            writeln!(self.stream, "  {}", message)?;
        }
        writeln!(self.stream)
    }

    fn print_summary(&mut self, stats: &TestRunStats) -> io::Result<()> {
        let totals = &stats.totals;
        let duration_ms = self
            .run_started
            .map(|start| start.elapsed().as_millis() as u64)
            .unwrap_or(0);

        writeln!(self.stream)?;
        writeln!(self.stream, "{}", HEAVY_RULE)?;
        if totals.test_cases.total() == 0 {
            writeln!(
                self.stream,
                "{}",
                self.colorizer.paint("No tests ran", Colour::Skipped)
            )?;
        } else if totals.test_cases.all_ok() && totals.assertions.all_ok() {
            let line = format!(
                "✅ All tests passed ({} assertions in {} test cases)",
                totals.assertions.passed, totals.test_cases.passed
            );
            writeln!(self.stream, "{}", self.colorizer.paint(&line, Colour::Passed))?;
        } else {
            let line = format!(
                "❌ FAILED ({} failed, {} passed in {}ms)",
                totals.test_cases.failed, totals.test_cases.passed, duration_ms
            );
            writeln!(self.stream, "{}", self.colorizer.paint(&line, Colour::Failed))?;
        }
        writeln!(self.stream, "{}", LIGHT_RULE)?;

        writeln!(self.stream, "📊 Execution Statistics:")?;
        writeln!(
            self.stream,
            "   • Test cases: {} | {} passed | {} failed | {} skipped",
            totals.test_cases.total(),
            totals.test_cases.passed,
            totals.test_cases.failed,
            totals.test_cases.skipped
        )?;
        writeln!(
            self.stream,
            "   • Assertions: {} | {} passed | {} failed",
            totals.assertions.total(),
            totals.assertions.passed,
            totals.assertions.failed
        )?;
        if totals.test_cases.failed_but_ok > 0 {
            writeln!(
                self.stream,
                "   • Failed as expected: {}",
                totals.test_cases.failed_but_ok
            )?;
        }
        writeln!(self.stream, "   • Duration: {}ms", duration_ms)?;

        if !self.failed_tests.is_empty() {
            writeln!(self.stream, "{}", LIGHT_RULE)?;
            writeln!(self.stream, "❌ Failed Tests:")?;
            for name in &self.failed_tests {
                writeln!(self.stream, "   • {}", name)?;
            }
        }
        if stats.aborting {
            writeln!(self.stream, "⚠️  Run aborted before all tests finished")?;
        }

        writeln!(self.stream, "{}", HEAVY_RULE)?;
        self.stream.flush()
    }
}

impl RegisteredReporter for ConsoleReporter {
    fn description() -> String {
        "Reports test results as plain lines of text".to_string()
    }

    fn from_config(config: ReporterConfig) -> Result<Self, ReportError> {
        Ok(Self::new(config))
    }
}

impl EventSink for ConsoleReporter {
    fn preferences(&self) -> ReporterPreferences {
        ReporterPreferences {
            should_redirect_std_out: false,
            should_report_all_assertions: self.config.include_successful,
        }
    }

    fn test_run_starting(&mut self, info: &TestRunInfo) -> Result<()> {
        self.run_started = Some(Instant::now());
        self.failed_tests.clear();
        if self.config.verbosity != Verbosity::Quiet {
            writeln!(self.stream, "{}", HEAVY_RULE)?;
            writeln!(
                self.stream,
                "{}",
                self.colorizer
                    .paint(&format!("Running {}", info.name), Colour::Headers)
            )?;
            writeln!(self.stream, "{}", HEAVY_RULE)?;
        }
        Ok(())
    }

    fn test_case_starting(&mut self, info: &TestCaseInfo) -> Result<()> {
        self.test_started = Some(Instant::now());
        self.current_test = Some(info.name.clone());
        self.sections.clear();
        if self.verbose() {
            writeln!(self.stream, "Testing {} ... ", info.name)?;
        }
        Ok(())
    }

    fn section_starting(&mut self, info: &SectionInfo) -> Result<()> {
        self.sections.push(info.name.clone());
        Ok(())
    }

    fn assertion_ended(&mut self, stats: &AssertionStats) -> Result<()> {
        let wanted = match stats.outcome {
            AssertionOutcome::Passed => self.config.include_successful,
            AssertionOutcome::Info => self.verbose(),
            _ => true,
        };
        if wanted {
            self.print_assertion(stats)?;
        }
        Ok(())
    }

    fn section_ended(&mut self, stats: &SectionStats) -> Result<()> {
        if stats.missing_assertions && self.verbose() {
            writeln!(
                self.stream,
                "{} no assertions in section '{}'",
                self.colorizer.paint("WARNING", Colour::Skipped),
                stats.info.name
            )?;
        }
        self.sections.pop();
        Ok(())
    }

    fn test_case_ended(&mut self, stats: &TestCaseStats) -> Result<()> {
        let elapsed = self.test_started.take().map(|s| s.elapsed());
        let passed = stats.passed();
        if !passed {
            self.failed_tests.push(stats.info.name.clone());
        }

        if self.verbose() {
            if passed {
                writeln!(self.stream, "{}", self.colorizer.paint("✅ PASS", Colour::Passed))?;
            } else {
                writeln!(self.stream, "{}", self.colorizer.paint("❌ FAIL", Colour::Failed))?;
            }
        }
        if self.config.show_durations
            && let Some(elapsed) = elapsed
        {
            writeln!(
                self.stream,
                "{:.3} s: {}",
                elapsed.as_secs_f64(),
                stats.info.name
            )?;
        }
        if !stats.std_out.is_empty() && (!passed || self.verbose()) {
            writeln!(self.stream, "  captured stdout:\n{}", stats.std_out.trim_end())?;
        }
        if !stats.std_err.is_empty() && (!passed || self.verbose()) {
            writeln!(self.stream, "  captured stderr:\n{}", stats.std_err.trim_end())?;
        }

        self.current_test = None;
        Ok(())
    }

    fn skip_test(&mut self, info: &TestCaseInfo) -> Result<()> {
        if self.verbose() {
            writeln!(
                self.stream,
                "{} {}",
                self.colorizer.paint("🔍 SKIP", Colour::Skipped),
                info.name
            )?;
        }
        Ok(())
    }

    fn test_run_ended(&mut self, stats: &TestRunStats) -> Result<()> {
        self.print_summary(stats)?;
        Ok(())
    }

    fn no_matching_test_cases(&mut self, spec: &str) -> Result<()> {
        writeln!(self.stream, "No test cases matched '{}'", spec)?;
        Ok(())
    }

    fn report_invalid_test_spec(&mut self, spec: &str) -> Result<()> {
        writeln!(self.stream, "Invalid Filter: {}", spec)?;
        Ok(())
    }

    fn fatal_error_encountered(&mut self, message: &str) -> Result<()> {
        writeln!(
            self.stream,
            "{} {}",
            self.colorizer.paint("❌ FATAL ERROR:", Colour::Failed),
            message
        )?;
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
