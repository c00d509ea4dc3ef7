// Main entry point for reporthub

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use reporthub::cli::{Cli, Commands};
use reporthub::commands;
use reporthub::config;
use reporthub::logging;
use reporthub::report::{ReportError, ReporterRegistry};

fn print_config(config: Option<&config::Config>) {
    println!("Current configuration:");
    match config {
        Some(cfg) => {
            println!("\n  Configuration file loaded:");
            println!("    Run name: {}", cfg.run.name);
            println!("    Verbosity: {:?}", cfg.run.verbosity);
            println!("    Include successful: {}", cfg.run.include_successful);
            println!("    Include hidden: {}", cfg.run.include_hidden);
            println!(
                "    Color: {}",
                if cfg.run.colour { "enabled" } else { "disabled" }
            );
            println!("    Reporters: {}", cfg.output.reporters.join(", "));
            if !cfg.output.listeners.is_empty() {
                println!("    Listeners: {}", cfg.output.listeners.join(", "));
            }
            if let Some(ref out) = cfg.output.out {
                println!("    Output: {}", out);
            }
        }
        None => {
            println!("\n  No configuration file loaded");
            println!("  Create one with: reporthub --init-config .reporthubrc.toml");
        }
    }

    println!("\nConfiguration precedence:");
    println!("  1. Command-line arguments (highest)");
    println!("  2. Configuration file");
    println!("  3. Built-in defaults (lowest)");
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if cli.verbose {
        info!("Starting reporthub v{}", env!("CARGO_PKG_VERSION"));
    }

    let loaded = config::Config::load();

    if let Some(shell) = &cli.completion {
        return commands::handle_completion(shell);
    }

    if let Some(path) = &cli.init_config {
        let content = config::Config::default().to_toml();
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        println!("Configuration written to {}", path.display());
        return Ok(());
    }

    if cli.config {
        print_config(loaded.as_ref());
        return Ok(());
    }

    let mut config = loaded.unwrap_or_default();
    if cli.no_color {
        config.run.colour = false;
        console::set_colors_enabled(false);
    }

    let registry = ReporterRegistry::with_builtin()?;

    let result = match &cli.command {
        Some(Commands::List(args)) => commands::handle_list(args, &config, &registry),
        Some(Commands::Replay(args)) => commands::handle_replay(args, &config, &registry),
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(err) = &result
        && err
            .chain()
            .any(|cause| cause.downcast_ref::<ReportError>().is_some_and(ReportError::is_fatal))
    {
        error!("Internal error, this is a bug: {:#}", err);
        std::process::exit(2);
    }

    result
}
