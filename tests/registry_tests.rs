// Tests for reporter registration, lookup and the built-in factories

mod common;

use std::sync::Arc;

use common::{buffer_config, config_with, source};
use reporthub::config::{RunConfig, Verbosity};
use reporthub::report::{
    EventSink, RegistrationError, ReportError, ReporterConfig, ReporterDescription,
    ReporterFactory, ReporterRegistry, SharedBuffer,
};
use reporthub::state::{TagInfo, TestCaseInfo};

/// Factory that refuses to build anything
struct MisuseFactory;

impl ReporterFactory for MisuseFactory {
    fn create(&self, _config: ReporterConfig) -> Result<Box<dyn EventSink>, ReportError> {
        Err(ReportError::InternalMisuse(
            "misuse factory cannot build reporters".to_string(),
        ))
    }

    fn description(&self) -> String {
        "Fake test factory".to_string()
    }
}

#[test]
fn test_registering_name_with_double_colon_fails() {
    let mut registry = ReporterRegistry::new();

    let err = registry
        .register_reporter("with::doublecolons", Box::new(MisuseFactory))
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "'::' is not allowed in reporter name: 'with::doublecolons'"
    );
    assert_eq!(
        err,
        RegistrationError::DoubleColon("with::doublecolons".to_string())
    );
    assert!(registry.is_empty());
}

#[test]
fn test_registering_plain_name_succeeds() {
    let mut registry = ReporterRegistry::new();

    registry
        .register_reporter("plainname", Box::new(MisuseFactory))
        .expect("plain names are accepted");

    assert_eq!(registry.len(), 1);
    let names: Vec<_> = registry.factories().map(|(name, _)| name.to_string()).collect();
    assert_eq!(names, vec!["plainname"]);
}

#[test]
fn test_double_colon_checked_before_emptiness_and_duplicates() {
    let mut registry = ReporterRegistry::new();
    registry
        .register_reporter("a::b", Box::new(MisuseFactory))
        .unwrap_err();

    // A rejected name leaves no trace, so it can't count as a duplicate later
    let err = registry
        .register_reporter("a::b", Box::new(MisuseFactory))
        .unwrap_err();
    assert!(matches!(err, RegistrationError::DoubleColon(_)));
}

#[test]
fn test_empty_and_duplicate_names_fail() {
    let mut registry = ReporterRegistry::new();
    registry
        .register_reporter("mine", Box::new(MisuseFactory))
        .unwrap();

    assert_eq!(
        registry
            .register_reporter("", Box::new(MisuseFactory))
            .unwrap_err(),
        RegistrationError::EmptyName
    );
    let err = registry
        .register_reporter("MINE", Box::new(MisuseFactory))
        .unwrap_err();
    assert!(matches!(err, RegistrationError::Duplicate(_)));
    assert!(err.to_string().contains("MINE"));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_registration_order_is_kept() {
    let mut registry = ReporterRegistry::new();
    for name in ["zeta", "alpha", "mid"] {
        registry
            .register_reporter(name, Box::new(MisuseFactory))
            .unwrap();
    }

    let names: Vec<_> = registry
        .reporter_descriptions()
        .into_iter()
        .map(|d| d.name)
        .collect();
    assert_eq!(names, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn test_factory_misuse_is_fatal() {
    let mut registry = ReporterRegistry::new();
    registry
        .register_reporter("misuse", Box::new(MisuseFactory))
        .unwrap();
    let (config, _buffer) = buffer_config();

    let err = registry.create("misuse", config).err().expect("creation fails");

    assert!(matches!(err, ReportError::InternalMisuse(_)));
    assert!(err.is_fatal());
}

#[test]
fn test_unknown_names_are_not_fatal() {
    let registry = ReporterRegistry::with_builtin().unwrap();
    let (config, _buffer) = buffer_config();

    let reporter_err = registry.create("nope", config.clone()).err().unwrap();
    let listener_err = registry.create_listener("nope", config).err().unwrap();

    assert!(matches!(reporter_err, ReportError::UnknownReporter(ref n) if n == "nope"));
    assert!(matches!(listener_err, ReportError::UnknownListener(ref n) if n == "nope"));
    assert!(!reporter_err.is_fatal());
}

#[test]
fn test_lookup_is_case_insensitive() {
    let registry = ReporterRegistry::with_builtin().unwrap();
    let (config, _buffer) = buffer_config();

    assert!(registry.create("JUnit", config.clone()).is_ok());
    assert!(registry.create_listener("TRACING", config).is_ok());
}

#[test]
fn test_builtin_registry_contents() {
    let registry = ReporterRegistry::with_builtin().unwrap();

    assert!(!registry.is_empty());
    let names: Vec<_> = registry.factories().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["console", "json", "junit", "stream"]);
    let listeners: Vec<_> = registry.listeners().map(|l| l.name()).collect();
    assert_eq!(listeners, vec!["tracing"]);
    assert!(
        registry
            .reporter_descriptions()
            .iter()
            .all(|d| !d.description.is_empty())
    );
}

fn listing_config() -> (ReporterConfig, SharedBuffer) {
    config_with(RunConfig {
        colour: false,
        list_details: true,
        verbosity: Verbosity::High,
        ..RunConfig::default()
    })
}

#[test]
fn test_every_builtin_reporter_lists_tags() {
    let registry = ReporterRegistry::with_builtin().unwrap();
    let mut tag = TagInfo::default();
    tag.add("fakeTag");
    let tags = vec![tag];

    for (name, factory) in registry.factories() {
        let (config, buffer) = listing_config();
        let mut reporter = factory.create(config).unwrap();

        reporter.list_tags(&tags).unwrap();

        let output = buffer.contents();
        assert!(
            output.contains("[fakeTag]"),
            "reporter '{}' did not list the tag: {}",
            name,
            output
        );
    }
}

#[test]
fn test_every_builtin_reporter_lists_reporters() {
    let registry = ReporterRegistry::with_builtin().unwrap();
    let descriptions = vec![ReporterDescription::new("fake reporter", "fake description")];

    for (name, factory) in registry.factories() {
        let (config, buffer) = listing_config();
        let mut reporter = factory.create(config).unwrap();

        reporter.list_reporters(&descriptions).unwrap();

        let output = buffer.contents();
        assert!(
            output.contains("fake reporter"),
            "reporter '{}' did not list the reporter: {}",
            name,
            output
        );
    }
}

#[test]
fn test_every_builtin_reporter_lists_tests() {
    let registry = ReporterRegistry::with_builtin().unwrap();
    let tests = vec![TestCaseInfo::new("fake test name", "[fakeTestTag]", source(1))];

    for (name, factory) in registry.factories() {
        let (config, buffer) = listing_config();
        let mut reporter = factory.create(config).unwrap();

        reporter.list_tests(&tests).unwrap();

        let output = buffer.contents();
        assert!(
            output.contains("fake test name"),
            "reporter '{}' did not list the test name: {}",
            name,
            output
        );
        assert!(
            output.contains("[fakeTestTag]"),
            "reporter '{}' did not list the test tag: {}",
            name,
            output
        );
    }
}

#[test]
fn test_builtin_listener_ignores_listing() {
    let registry = ReporterRegistry::with_builtin().unwrap();
    let (config, buffer) = listing_config();
    let mut listener = registry.create_listener("tracing", config).unwrap();

    listener
        .list_reporters(&[ReporterDescription::new("fake reporter", "fake")])
        .unwrap();

    assert!(buffer.contents().is_empty());
}

#[test]
fn test_shared_registry_across_threads() {
    let registry = Arc::new(ReporterRegistry::with_builtin().unwrap());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = registry.clone();
            std::thread::spawn(move || registry.reporter_descriptions().len())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 4);
    }
}
