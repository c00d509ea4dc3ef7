// Configuration file handling

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// How much detail reporters and listings produce
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    High,
}

impl FromStr for Verbosity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" => Ok(Self::Quiet),
            "normal" => Ok(Self::Normal),
            "high" => Ok(Self::High),
            other => Err(format!("Unknown verbosity: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub run: RunConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Settings every reporter sees through its `ReporterConfig`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Name reported for the run
    #[serde(default = "default_run_name")]
    pub name: String,

    /// Report passing assertions too
    #[serde(default)]
    pub include_successful: bool,

    /// Print per-test durations
    #[serde(default)]
    pub show_durations: bool,

    #[serde(default)]
    pub verbosity: Verbosity,

    /// List hidden tests
    #[serde(default)]
    pub include_hidden: bool,

    /// List tag counts and aliases
    #[serde(default)]
    pub list_details: bool,

    /// Enable colored output
    #[serde(default = "default_colour")]
    pub colour: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            name: default_run_name(),
            include_successful: false,
            show_durations: false,
            verbosity: Verbosity::default(),
            include_hidden: false,
            list_details: false,
            colour: default_colour(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Reporters to attach, by registered name
    #[serde(default = "default_reporters")]
    pub reporters: Vec<String>,

    /// Listeners to attach, by registered name
    #[serde(default)]
    pub listeners: Vec<String>,

    /// Output file; stdout when unset
    #[serde(default)]
    pub out: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            reporters: default_reporters(),
            listeners: Vec::new(),
            out: None,
        }
    }
}

pub const CONFIG_FILE_NAMES: [&str; 2] = [".reporthubrc", ".reporthubrc.toml"];

pub fn default_run_name() -> String {
    String::from("reporthub")
}

pub fn default_reporters() -> Vec<String> {
    vec![String::from("console")]
}

fn default_colour() -> bool {
    true
}

impl Config {
    /// Load configuration from default locations
    pub fn load() -> Option<Self> {
        // Current directory wins over the home directory; within each,
        // the bare name wins over the .toml one.
        let mut search_dirs = Vec::new();
        if let Ok(cwd) = std::env::current_dir() {
            search_dirs.push(cwd);
        }
        if let Some(home) = dirs::home_dir() {
            search_dirs.push(home);
        }

        search_dirs
            .iter()
            .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
            .find(|path| path.exists())
            .and_then(|path| Self::load_from_file(&path))
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Option<Self> {
        toml::from_str(content).ok()
    }

    /// Generate default configuration as TOML
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
[run]
name = "nightly"
include_successful = true
verbosity = "high"
include_hidden = true
colour = false

[output]
reporters = ["console", "junit"]
listeners = ["tracing"]
out = "report.xml"
"#;

        let config = Config::parse(toml).expect("Failed to parse config");
        assert_eq!(config.run.name, "nightly");
        assert!(config.run.include_successful);
        assert!(!config.run.show_durations);
        assert_eq!(config.run.verbosity, Verbosity::High);
        assert!(config.run.include_hidden);
        assert!(!config.run.colour);
        assert_eq!(config.output.reporters, vec!["console", "junit"]);
        assert_eq!(config.output.listeners, vec!["tracing"]);
        assert_eq!(config.output.out, Some("report.xml".to_string()));
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config = Config::parse("").expect("Failed to parse config");
        assert_eq!(config.run, RunConfig::default());
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_to_toml_round_trips() {
        let config = Config::default();
        let parsed = Config::parse(&config.to_toml()).expect("Failed to parse generated config");
        assert_eq!(parsed.run, config.run);
    }

    #[test]
    fn test_verbosity_from_str() {
        assert_eq!("Quiet".parse::<Verbosity>(), Ok(Verbosity::Quiet));
        assert!("loud".parse::<Verbosity>().is_err());
    }
}
