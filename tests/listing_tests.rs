// Tests for the default text listings

mod common;

use common::source;
use reporthub::config::Verbosity;
use reporthub::report::listing::{
    default_list_listeners, default_list_reporters, default_list_tags, default_list_tests,
};
use reporthub::report::{Colorizer, ListenerDescription, ReporterDescription};
use reporthub::state::{TagInfo, TestCaseInfo, collect_tags};

fn render(f: impl FnOnce(&mut Vec<u8>) -> std::io::Result<()>) -> String {
    let mut out = Vec::new();
    f(&mut out).expect("listing writes succeed");
    String::from_utf8(out).expect("listing output is UTF-8")
}

fn fake_tag() -> TagInfo {
    let mut tag = TagInfo::default();
    tag.add("fakeTag");
    tag
}

#[test]
fn test_list_tags_brackets_names() {
    let output = render(|out| default_list_tags(out, &[fake_tag()], false));

    assert!(output.contains("[fakeTag]"), "{}", output);
    assert!(output.contains("1 tag"));
}

#[test]
fn test_list_tags_with_details_shows_counts_and_aliases() {
    let tests = vec![
        TestCaseInfo::new("one", "[Net]", source(1)),
        TestCaseInfo::new("two", "[net][slow]", source(2)),
    ];
    let tags = collect_tags(tests.iter());

    let output = render(|out| default_list_tags(out, &tags, true));

    assert!(output.contains("     2  [Net][net]"), "{}", output);
    assert!(output.contains("     1  [slow]"), "{}", output);
    assert!(output.contains("2 tags"));
}

#[test]
fn test_list_reporters_shows_name_and_description() {
    let descriptions = vec![ReporterDescription::new("fake reporter", "fake description")];

    let output =
        render(|out| default_list_reporters(out, &descriptions, Verbosity::Normal));

    assert!(output.contains("fake reporter"));
    assert!(output.contains("fake description"));
}

#[test]
fn test_list_reporters_quiet_prints_names_only() {
    let descriptions = vec![ReporterDescription::new("fake reporter", "fake description")];

    let output = render(|out| default_list_reporters(out, &descriptions, Verbosity::Quiet));

    assert_eq!(output, "fake reporter\n");
}

#[test]
fn test_list_listeners() {
    let descriptions = vec![ListenerDescription::new("fake listener", "listens")];

    let output =
        render(|out| default_list_listeners(out, &descriptions, Verbosity::Normal));
    let empty = render(|out| default_list_listeners(out, &[], Verbosity::Normal));

    assert!(output.contains("fake listener: listens"));
    assert!(empty.contains("No listeners registered"));
}

#[test]
fn test_list_tests_shows_name_and_tags() {
    let tests = vec![TestCaseInfo::new("fake test name", "[fakeTestTag]", source(7))];

    let output = render(|out| {
        default_list_tests(out, &Colorizer::plain(), &tests, false, Verbosity::Normal)
    });

    assert!(output.contains("fake test name"));
    assert!(output.contains("fakeTestTag"));
    assert!(!output.contains("sample.rs:7"));
}

#[test]
fn test_list_tests_high_verbosity_adds_location() {
    let tests = vec![TestCaseInfo::new("fake test name", "[fakeTestTag]", source(7))];

    let output = render(|out| {
        default_list_tests(out, &Colorizer::plain(), &tests, false, Verbosity::High)
    });

    assert!(output.contains("sample.rs:7"));
}

#[test]
fn test_list_tests_hides_hidden_tests_unless_asked() {
    let tests = vec![
        TestCaseInfo::new("visible", "[a]", source(1)),
        TestCaseInfo::new("secret", "[!hide]", source(2)),
        TestCaseInfo::new("dotted", "[.slow]", source(3)),
    ];

    let hidden_off = render(|out| {
        default_list_tests(out, &Colorizer::plain(), &tests, false, Verbosity::Quiet)
    });
    let hidden_on = render(|out| {
        default_list_tests(out, &Colorizer::plain(), &tests, true, Verbosity::Normal)
    });

    assert_eq!(hidden_off, "visible\n");
    assert!(hidden_on.contains("secret"));
    assert!(hidden_on.contains("dotted"));
    assert!(hidden_on.contains("3 test cases"));
}

#[test]
fn test_listing_is_idempotent() {
    let tags = vec![fake_tag()];
    let tests = vec![TestCaseInfo::new("fake test name", "[fakeTestTag]", source(7))];
    let descriptions = vec![ReporterDescription::new("fake reporter", "fake description")];

    let once = render(|out| {
        default_list_tags(out, &tags, true)?;
        default_list_reporters(out, &descriptions, Verbosity::Normal)?;
        default_list_tests(out, &Colorizer::plain(), &tests, false, Verbosity::Normal)
    });
    let twice = render(|out| {
        for _ in 0..2 {
            default_list_tags(out, &tags, true)?;
            default_list_reporters(out, &descriptions, Verbosity::Normal)?;
            default_list_tests(out, &Colorizer::plain(), &tests, false, Verbosity::Normal)?;
        }
        Ok(())
    });

    assert_eq!(twice, format!("{}{}", once, once));
}

#[test]
fn test_empty_listings() {
    let tags = render(|out| default_list_tags(out, &[], false));
    let tests = render(|out| {
        default_list_tests(out, &Colorizer::plain(), &[], false, Verbosity::Normal)
    });

    assert!(tags.contains("0 tags"));
    assert!(tests.contains("0 test cases"));
}
