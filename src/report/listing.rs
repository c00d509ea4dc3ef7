//! Default text renderings for the listing operations.
//!
//! Sinks that have an output destination delegate to these unless they
//! override the listing hooks. The helpers keep no state and only write to
//! the destination they are given.

use std::io::{self, Write};

use super::colour::{Colour, Colorizer};
use super::{ListenerDescription, ReporterDescription};
use crate::config::Verbosity;
use crate::state::{TagInfo, TestCaseInfo};

fn pluralise(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// Write each tag bracketed; with `show_details` also its count and aliases
pub fn default_list_tags(
    out: &mut dyn Write,
    tags: &[TagInfo],
    show_details: bool,
) -> io::Result<()> {
    writeln!(out, "All available tags:")?;
    for tag in tags {
        if show_details {
            writeln!(out, "{:>6}  {}", tag.count(), tag.all())?;
        } else {
            writeln!(out, "  [{}]", tag.name())?;
        }
    }
    writeln!(out, "{}", pluralise(tags.len(), "tag"))?;
    writeln!(out)?;
    out.flush()
}

fn list_described<'a>(
    out: &mut dyn Write,
    header: &str,
    entries: impl Iterator<Item = (&'a str, &'a str)> + Clone,
    verbosity: Verbosity,
) -> io::Result<()> {
    if verbosity == Verbosity::Quiet {
        for (name, _) in entries {
            writeln!(out, "{}", name)?;
        }
        return out.flush();
    }

    writeln!(out, "{}", header)?;
    let width = entries.clone().map(|(name, _)| name.len()).max().unwrap_or(0);
    for (name, description) in entries {
        let label = format!("{}:", name);
        writeln!(out, "  {:<w$} {}", label, description, w = width + 1)?;
    }
    writeln!(out)?;
    out.flush()
}

/// Write each reporter name, plus its description unless `verbosity` is quiet
pub fn default_list_reporters(
    out: &mut dyn Write,
    descriptions: &[ReporterDescription],
    verbosity: Verbosity,
) -> io::Result<()> {
    let entries = descriptions
        .iter()
        .map(|d| (d.name.as_str(), d.description.as_str()));
    list_described(out, "Available reporters:", entries, verbosity)
}

pub fn default_list_listeners(
    out: &mut dyn Write,
    descriptions: &[ListenerDescription],
    verbosity: Verbosity,
) -> io::Result<()> {
    if descriptions.is_empty() && verbosity != Verbosity::Quiet {
        writeln!(out, "No listeners registered")?;
        return out.flush();
    }
    let entries = descriptions
        .iter()
        .map(|d| (d.name.as_str(), d.description.as_str()));
    list_described(out, "Registered listeners:", entries, verbosity)
}

/// Write each visible test's name and bracketed tags.
///
/// Hidden tests are skipped unless `include_hidden`. `High` verbosity adds
/// the source location, `Quiet` writes bare names.
pub fn default_list_tests(
    out: &mut dyn Write,
    colorizer: &Colorizer,
    tests: &[TestCaseInfo],
    include_hidden: bool,
    verbosity: Verbosity,
) -> io::Result<()> {
    let visible: Vec<&TestCaseInfo> = tests
        .iter()
        .filter(|t| include_hidden || !t.is_hidden())
        .collect();

    if verbosity == Verbosity::Quiet {
        for test in &visible {
            writeln!(out, "{}", test.name)?;
        }
        return out.flush();
    }

    writeln!(out, "All available test cases:")?;
    for test in &visible {
        let colour = if test.is_hidden() {
            Colour::Secondary
        } else {
            Colour::Headers
        };
        writeln!(out, "  {}", colorizer.paint(&test.name, colour))?;
        if verbosity == Verbosity::High {
            writeln!(
                out,
                "    {}",
                colorizer.paint(&test.source.to_string(), Colour::Secondary)
            )?;
        }
        if !test.tags.is_empty() {
            writeln!(out, "      {}", test.tags_as_string())?;
        }
    }
    writeln!(out, "{}", pluralise(visible.len(), "test case"))?;
    writeln!(out)?;
    out.flush()
}
