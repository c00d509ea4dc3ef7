// Report module - event sinks, their registry, and the multi-sink dispatcher

pub mod collector;
pub mod colour;
pub mod console;
pub mod error;
pub mod event;
pub mod json;
pub mod junit;
pub mod listing;
pub mod multi;
pub mod preferences;
pub mod registry;
pub mod stream;
pub mod streaming;
pub mod tracing_listener;

use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;

use crate::config::RunConfig;
use crate::state::{
    AssertionInfo, AssertionStats, SectionInfo, SectionStats, TagInfo, TestCaseInfo,
    TestCaseStats, TestRunInfo, TestRunStats,
};

pub use colour::{Colour, Colorizer};
pub use console::ConsoleReporter;
pub use error::{RegistrationError, ReportError};
pub use event::{Event, EventRecord};
pub use json::JsonReporter;
pub use junit::JunitReporter;
pub use multi::MultiSink;
pub use preferences::ReporterPreferences;
pub use registry::{
    FactoryFor, ListenerFactory, RegisteredListener, RegisteredReporter, ReporterFactory,
    ReporterRegistry,
};
pub use stream::{OutputStream, SharedBuffer};
pub use streaming::StreamingJsonReporter;
pub use tracing_listener::TracingListener;

/// Name and blurb of a registered reporter, used only for listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReporterDescription {
    pub name: String,
    pub description: String,
}

impl ReporterDescription {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Name and blurb of a registered listener
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListenerDescription {
    pub name: String,
    pub description: String,
}

impl ListenerDescription {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Everything a factory gets to build a sink for one run
#[derive(Debug, Clone)]
pub struct ReporterConfig {
    pub run: Arc<RunConfig>,
    pub stream: OutputStream,
}

impl ReporterConfig {
    pub fn new(run: Arc<RunConfig>, stream: OutputStream) -> Self {
        Self { run, stream }
    }
}

/// Where the default listing implementation writes, and how
pub struct ListingOutput<'a> {
    pub out: &'a mut dyn Write,
    pub config: &'a RunConfig,
}

/// Receiver of run events.
///
/// Listeners and reporters implement the same trait; which one a sink is
/// depends only on how it was added to a [`MultiSink`]. Every hook defaults
/// to doing nothing. An error returned from a hook aborts dispatch of that
/// event and reaches whoever is driving the run.
pub trait EventSink: Send {
    fn preferences(&self) -> ReporterPreferences {
        ReporterPreferences::default()
    }

    fn test_run_starting(&mut self, _info: &TestRunInfo) -> Result<()> {
        Ok(())
    }

    fn test_case_starting(&mut self, _info: &TestCaseInfo) -> Result<()> {
        Ok(())
    }

    fn section_starting(&mut self, _info: &SectionInfo) -> Result<()> {
        Ok(())
    }

    fn assertion_starting(&mut self, _info: &AssertionInfo) -> Result<()> {
        Ok(())
    }

    fn assertion_ended(&mut self, _stats: &AssertionStats) -> Result<()> {
        Ok(())
    }

    fn section_ended(&mut self, _stats: &SectionStats) -> Result<()> {
        Ok(())
    }

    fn test_case_ended(&mut self, _stats: &TestCaseStats) -> Result<()> {
        Ok(())
    }

    /// A matched test is not going to run
    fn skip_test(&mut self, _info: &TestCaseInfo) -> Result<()> {
        Ok(())
    }

    fn test_run_ended(&mut self, _stats: &TestRunStats) -> Result<()> {
        Ok(())
    }

    fn no_matching_test_cases(&mut self, _spec: &str) -> Result<()> {
        Ok(())
    }

    fn report_invalid_test_spec(&mut self, _spec: &str) -> Result<()> {
        Ok(())
    }

    fn fatal_error_encountered(&mut self, _message: &str) -> Result<()> {
        Ok(())
    }

    /// Destination for the default listing implementation.
    ///
    /// Sinks returning `None` ignore listing requests.
    fn listing_output(&mut self) -> Option<ListingOutput<'_>> {
        None
    }

    fn list_tags(&mut self, tags: &[TagInfo]) -> Result<()> {
        if let Some(target) = self.listing_output() {
            listing::default_list_tags(target.out, tags, target.config.list_details)?;
        }
        Ok(())
    }

    fn list_reporters(&mut self, descriptions: &[ReporterDescription]) -> Result<()> {
        if let Some(target) = self.listing_output() {
            listing::default_list_reporters(target.out, descriptions, target.config.verbosity)?;
        }
        Ok(())
    }

    fn list_listeners(&mut self, descriptions: &[ListenerDescription]) -> Result<()> {
        if let Some(target) = self.listing_output() {
            listing::default_list_listeners(target.out, descriptions, target.config.verbosity)?;
        }
        Ok(())
    }

    fn list_tests(&mut self, tests: &[TestCaseInfo]) -> Result<()> {
        if let Some(target) = self.listing_output() {
            let colorizer = Colorizer::new(target.config.colour);
            listing::default_list_tests(
                target.out,
                &colorizer,
                tests,
                target.config.include_hidden,
                target.config.verbosity,
            )?;
        }
        Ok(())
    }
}
