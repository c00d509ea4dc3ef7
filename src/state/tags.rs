// Tag parsing and per-tag bookkeeping for listings

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use super::TestCaseInfo;

/// Split a bracketed tag spec (`"[a][b]"`) into its tag spellings.
///
/// Text outside brackets and empty brackets are ignored.
pub fn parse_tags(spec: &str) -> BTreeSet<String> {
    let mut tags = BTreeSet::new();
    let mut rest = spec;

    while let Some(open) = rest.find('[') {
        let after = &rest[open + 1..];
        let Some(close) = after.find(']') else {
            break;
        };
        let tag = after[..close].trim();
        if !tag.is_empty() {
            tags.insert(tag.to_string());
        }
        rest = &after[close + 1..];
    }

    tags
}

/// One tag as seen across a set of tests.
///
/// The first spelling added becomes canonical; later spellings that differ
/// only in case are kept as aliases.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TagInfo {
    canonical: String,
    aliases: BTreeSet<String>,
    count: usize,
}

impl TagInfo {
    /// Record one more occurrence of the tag under `spelling`
    pub fn add(&mut self, spelling: &str) {
        if self.canonical.is_empty() {
            self.canonical = spelling.to_string();
        } else if self.canonical != spelling {
            self.aliases.insert(spelling.to_string());
        }
        self.count += 1;
    }

    pub fn name(&self) -> &str {
        &self.canonical
    }

    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.aliases.iter().map(String::as_str)
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// All spellings in bracketed form, canonical first
    pub fn all(&self) -> String {
        std::iter::once(self.canonical.as_str())
            .chain(self.aliases())
            .map(|s| format!("[{}]", s))
            .collect()
    }

    fn key(&self) -> String {
        self.canonical.to_lowercase()
    }
}

impl PartialEq for TagInfo {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for TagInfo {}

impl PartialOrd for TagInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TagInfo {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Gather tag statistics over a set of tests, sorted case-insensitively
pub fn collect_tags<'a>(tests: impl IntoIterator<Item = &'a TestCaseInfo>) -> Vec<TagInfo> {
    let mut by_key: BTreeMap<String, TagInfo> = BTreeMap::new();
    for test in tests {
        for tag in &test.tags {
            by_key.entry(tag.to_lowercase()).or_default().add(tag);
        }
    }
    by_key.into_values().collect()
}
