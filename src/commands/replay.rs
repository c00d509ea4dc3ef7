// Replay command - drive reporters from a recorded event stream

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::sync::Arc;
use tracing::{debug, info};

use super::build_sinks;
use crate::cli::args::ReplayArgs;
use crate::config::Config;
use crate::report::streaming::LISTING_EVENTS;
use crate::report::{Event, EventRecord, ReporterPreferences, ReporterRegistry};
use crate::state::AssertionOutcome;

/// Parse one stream line; listing records yield `None`
pub fn parse_record(line: &str) -> Result<Option<EventRecord>> {
    let value: serde_json::Value = serde_json::from_str(line).context("Malformed JSON")?;
    if let Some(kind) = value.get("event").and_then(|v| v.as_str())
        && LISTING_EVENTS.contains(&kind)
    {
        return Ok(None);
    }
    let record = serde_json::from_value(value).context("Unrecognised event record")?;
    Ok(Some(record))
}

/// Shape an event the way an engine honouring `prefs` would have produced it.
///
/// Passing assertions are dropped unless some sink asked for all of them, and
/// captured output is dropped unless some sink asked for it.
pub fn apply_preferences(event: Event, prefs: ReporterPreferences) -> Option<Event> {
    match event {
        Event::AssertionEnded(stats)
            if stats.outcome == AssertionOutcome::Passed && !prefs.should_report_all_assertions =>
        {
            None
        }
        Event::TestCaseEnded(mut stats) if !prefs.should_redirect_std_out => {
            stats.std_out.clear();
            stats.std_err.clear();
            Some(Event::TestCaseEnded(stats))
        }
        other => Some(other),
    }
}

pub fn handle_replay(args: &ReplayArgs, config: &Config, registry: &ReporterRegistry) -> Result<()> {
    let file = File::open(&args.events)
        .with_context(|| format!("Failed to open event stream: {}", args.events.display()))?;

    let mut run = config.run.clone();
    run.include_successful |= args.success;
    run.show_durations |= args.durations;
    if let Some(verbosity) = args.sinks.verbosity {
        run.verbosity = verbosity;
    }

    let mut sinks = build_sinks(registry, Arc::new(run), &args.sinks, &config.output)?;
    let prefs = sinks.preferences();

    let mut dispatched = 0usize;
    let mut dropped = 0usize;
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("Failed to read line {}", line_no))?;
        if line.trim().is_empty() {
            continue;
        }

        let Some(record) = parse_record(&line)
            .with_context(|| format!("{}:{}", args.events.display(), line_no))?
        else {
            debug!("Skipping listing record on line {}", line_no);
            continue;
        };

        let Some(event) = apply_preferences(record.event, prefs) else {
            dropped += 1;
            continue;
        };

        event
            .dispatch(&mut sinks)
            .with_context(|| format!("Sink failed on '{}' event (line {})", event.name(), line_no))?;
        dispatched += 1;
    }

    info!(
        "Replayed {} event(s), {} dropped by preferences",
        dispatched, dropped
    );
    Ok(())
}
