// Log formatting and subscriber setup

use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// `⚠️  WARN [12:00:01] reporthub::commands: message`
pub struct CustomFormatter;

fn level_prefix(level: &Level) -> (&'static str, &'static str) {
    match *level {
        Level::TRACE => ("🔬", "TRACE"),
        Level::DEBUG => ("🐛", "DEBUG"),
        Level::INFO => ("ℹ️ ", "INFO"),
        Level::WARN => ("⚠️ ", "WARN"),
        Level::ERROR => ("❌", "ERROR"),
    }
}

impl<S, N> FormatEvent<S, N> for CustomFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let (emoji, level) = level_prefix(metadata.level());

        write!(
            writer,
            "{} {} [{}]",
            emoji,
            level,
            Local::now().format("%H:%M:%S")
        )?;
        // Targets outside our crate are worth naming; ours are noise at info and up
        if *metadata.level() >= Level::DEBUG || !metadata.target().starts_with("reporthub") {
            write!(writer, " {}", metadata.target())?;
        }
        write!(writer, ": ")?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// Default filter directive for the binary
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "reporthub=debug,warn"
    } else {
        "reporthub=warn,error"
    }
}

/// Install the global subscriber; `RUST_LOG` overrides the default filter.
/// Logs go to stderr so they never mix with reporter output on stdout.
pub fn init(verbose: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let _ = tracing_subscriber::fmt()
        .event_format(CustomFormatter)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
