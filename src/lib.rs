pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod report;
pub mod state;

pub use report::{EventSink, MultiSink, ReporterPreferences, ReporterRegistry};
