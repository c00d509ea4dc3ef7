// Commands module - handles CLI command execution

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, warn};

pub mod list;
pub mod replay;

pub use list::handle_list;
pub use replay::handle_replay;

use crate::cli::args::SinkArgs;
use crate::config::{OutputConfig, RunConfig};
use crate::report::{MultiSink, OutputStream, ReporterConfig, ReporterRegistry};

/// Handle shell completion
pub fn handle_completion(shell_type: &str) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{Shell, generate};

    let shell = match shell_type.to_lowercase().as_str() {
        "bash" => Shell::Bash,
        "zsh" => Shell::Zsh,
        "fish" => Shell::Fish,
        "powershell" => Shell::PowerShell,
        _ => {
            anyhow::bail!(
                "Unsupported shell: {}. Supported: bash, zsh, fish, powershell",
                shell_type
            );
        }
    };

    let mut cmd = crate::cli::Cli::command();
    let name = cmd.get_name().to_string();
    let mut stdout = std::io::stdout();

    generate(shell, &mut cmd, name, &mut stdout);

    Ok(())
}

/// Open the output destination: command line first, then config, then stdout
pub fn open_output(args: &SinkArgs, output: &OutputConfig) -> Result<OutputStream> {
    match (&args.out, &output.out) {
        (Some(path), _) => OutputStream::file(path),
        (None, Some(path)) => OutputStream::file(std::path::Path::new(path)),
        (None, None) => Ok(OutputStream::stdout()),
    }
}

/// Build the multi-sink for one command from CLI choices, falling back to config
pub fn build_sinks(
    registry: &ReporterRegistry,
    run: Arc<RunConfig>,
    args: &SinkArgs,
    output: &OutputConfig,
) -> Result<MultiSink> {
    let stream = open_output(args, output)?;
    let reporters = if args.reporters.is_empty() {
        &output.reporters
    } else {
        &args.reporters
    };
    let listeners = if args.listeners.is_empty() {
        &output.listeners
    } else {
        &args.listeners
    };

    let mut sinks = MultiSink::new();
    for name in listeners {
        let listener = registry
            .create_listener(name, ReporterConfig::new(run.clone(), stream.clone()))
            .with_context(|| format!("Failed to create listener '{}'", name))?;
        sinks.add_listener(listener);
    }
    for name in reporters {
        let reporter = registry
            .create(name, ReporterConfig::new(run.clone(), stream.clone()))
            .with_context(|| format!("Failed to create reporter '{}'", name))?;
        sinks.add_reporter(reporter);
    }

    if sinks.is_empty() {
        warn!("No reporters or listeners configured; nothing will be written");
    }
    debug!(
        "Attached {} listener(s) and {} reporter(s), preferences: {:?}",
        sinks.listener_count(),
        sinks.reporter_count(),
        sinks.preferences()
    );

    Ok(sinks)
}
