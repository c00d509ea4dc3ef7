// List command - list reporters, listeners, tags or tests through the configured sinks

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use super::build_sinks;
use crate::cli::args::{ListArgs, ListKind};
use crate::config::Config;
use crate::report::{EventSink, ReporterRegistry};
use crate::state::{SourceLineInfo, TestCaseInfo, collect_tags};

/// One test in a JSON manifest
#[derive(Debug, Deserialize)]
struct ManifestEntry {
    name: String,
    /// Bracketed tag spec, e.g. `"[fast][db]"`
    #[serde(default)]
    tags: String,
    #[serde(default)]
    file: String,
    #[serde(default)]
    line: u64,
    #[serde(default)]
    class_name: String,
}

impl From<ManifestEntry> for TestCaseInfo {
    fn from(entry: ManifestEntry) -> Self {
        TestCaseInfo::new(
            entry.name,
            &entry.tags,
            SourceLineInfo::new(entry.file, entry.line),
        )
        .with_class_name(entry.class_name)
    }
}

/// Read a JSON array of tests
pub fn load_manifest(path: &Path) -> Result<Vec<TestCaseInfo>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
    let entries: Vec<ManifestEntry> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse manifest: {}", path.display()))?;
    info!("Loaded {} test(s) from {}", entries.len(), path.display());
    Ok(entries.into_iter().map(TestCaseInfo::from).collect())
}

fn manifest_tests(args: &ListArgs) -> Result<Vec<TestCaseInfo>> {
    let path = args
        .manifest
        .as_deref()
        .with_context(|| "--manifest is required to list tags or tests")?;
    load_manifest(path)
}

pub fn handle_list(args: &ListArgs, config: &Config, registry: &ReporterRegistry) -> Result<()> {
    let mut run = config.run.clone();
    run.include_hidden |= args.include_hidden;
    run.list_details |= args.details;
    if let Some(verbosity) = args.sinks.verbosity {
        run.verbosity = verbosity;
    }
    let include_hidden = run.include_hidden;

    let mut sinks = build_sinks(registry, Arc::new(run), &args.sinks, &config.output)?;

    match args.kind {
        ListKind::Reporters => sinks.list_reporters(&registry.reporter_descriptions())?,
        ListKind::Listeners => sinks.list_listeners(&registry.listener_descriptions())?,
        ListKind::Tags => {
            let tests = manifest_tests(args)?;
            let tags = collect_tags(tests.iter().filter(|t| include_hidden || !t.is_hidden()));
            sinks.list_tags(&tags)?;
        }
        ListKind::Tests => {
            let tests = manifest_tests(args)?;
            sinks.list_tests(&tests)?;
        }
    }

    Ok(())
}
