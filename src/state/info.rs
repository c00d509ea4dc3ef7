// Event payloads describing what is about to run

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::tags::parse_tags;

/// Location of a test, section or assertion in its source file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLineInfo {
    pub file: String,
    pub line: u64,
}

impl SourceLineInfo {
    pub fn new(file: impl Into<String>, line: u64) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for SourceLineInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Information about the whole run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRunInfo {
    pub name: String,
}

impl TestRunInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Static description of a single test case.
///
/// Owned by whatever discovered the test; sinks only ever see it by reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCaseInfo {
    pub name: String,
    #[serde(default)]
    pub class_name: String,
    /// Tag spellings without the surrounding brackets
    #[serde(default)]
    pub tags: BTreeSet<String>,
    pub source: SourceLineInfo,
}

impl TestCaseInfo {
    /// Build a test case from a bracketed tag spec such as `"[fast][.slow]"`
    pub fn new(name: impl Into<String>, tag_spec: &str, source: SourceLineInfo) -> Self {
        Self {
            name: name.into(),
            class_name: String::new(),
            tags: parse_tags(tag_spec),
            source,
        }
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    /// Hidden tests only run (and list) when asked for explicitly
    pub fn is_hidden(&self) -> bool {
        self.tags
            .iter()
            .any(|tag| tag == "!hide" || tag.starts_with('.'))
    }

    /// Tags rendered back into bracketed form, e.g. `[fast][io]`
    pub fn tags_as_string(&self) -> String {
        self.tags.iter().map(|t| format!("[{}]", t)).collect()
    }
}

/// A section nested inside a test case
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionInfo {
    pub name: String,
    pub source: SourceLineInfo,
}

impl SectionInfo {
    pub fn new(name: impl Into<String>, source: SourceLineInfo) -> Self {
        Self {
            name: name.into(),
            source,
        }
    }
}

/// What an assertion is about to check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionInfo {
    pub macro_name: String,
    pub expression: String,
    pub source: SourceLineInfo,
}

impl AssertionInfo {
    pub fn new(
        macro_name: impl Into<String>,
        expression: impl Into<String>,
        source: SourceLineInfo,
    ) -> Self {
        Self {
            macro_name: macro_name.into(),
            expression: expression.into(),
            source,
        }
    }
}
