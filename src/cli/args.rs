// CLI argument definitions using Clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::Verbosity;

/// What `list` should print
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListKind {
    Reporters,
    Listeners,
    Tags,
    Tests,
}

/// Fan test-run events out to configurable reporters
#[derive(Parser, Debug)]
#[command(name = "reporthub")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "List and replay test runs through registered reporters", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose debug output
    #[arg(short = 'v', long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(short = 'c', long, global = true, default_value_t = false)]
    pub no_color: bool,

    /// Show current configuration and exit
    #[arg(long, default_value_t = false)]
    pub config: bool,

    /// Create default configuration file
    #[arg(long, value_name = "CONFIG_FILE")]
    pub init_config: Option<PathBuf>,

    /// Print shell completion script (bash, zsh, fish, powershell)
    #[arg(long, value_name = "SHELL_TYPE", value_parser = ["bash", "zsh", "fish", "powershell"])]
    pub completion: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List reporters, listeners, tags or tests
    List(ListArgs),

    /// Feed a recorded event stream through reporters and listeners
    Replay(ReplayArgs),
}

/// Options shared by every command that builds sinks
#[derive(Args, Debug, Clone, Default)]
pub struct SinkArgs {
    /// Reporter to attach (repeatable); defaults to the configured reporters
    #[arg(short = 'r', long = "reporter", value_name = "NAME")]
    pub reporters: Vec<String>,

    /// Listener to attach (repeatable)
    #[arg(short = 'l', long = "listener", value_name = "NAME")]
    pub listeners: Vec<String>,

    /// Write reporter output to a file instead of stdout
    #[arg(short = 'o', long, value_name = "OUTPUT_FILE")]
    pub out: Option<PathBuf>,

    /// Output detail (quiet, normal, high)
    #[arg(long, value_name = "LEVEL")]
    pub verbosity: Option<Verbosity>,
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// What to list
    #[arg(value_enum)]
    pub kind: ListKind,

    /// JSON test manifest (required for tags and tests)
    #[arg(short = 'm', long, value_name = "MANIFEST")]
    pub manifest: Option<PathBuf>,

    /// Include hidden tests
    #[arg(long, default_value_t = false)]
    pub include_hidden: bool,

    /// Show tag counts and aliases
    #[arg(long, default_value_t = false)]
    pub details: bool,

    #[command(flatten)]
    pub sinks: SinkArgs,
}

#[derive(Args, Debug, Clone)]
pub struct ReplayArgs {
    /// File of newline-delimited JSON events, as written by the stream reporter
    #[arg(required = true)]
    pub events: PathBuf,

    /// Report passing assertions too
    #[arg(short = 's', long, default_value_t = false)]
    pub success: bool,

    /// Print per-test durations
    #[arg(long, default_value_t = false)]
    pub durations: bool,

    #[command(flatten)]
    pub sinks: SinkArgs,
}
