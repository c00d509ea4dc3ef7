//! Name-to-factory registry for reporters and listeners.
//!
//! Built once at startup through [`ReporterRegistry::with_builtin`] (plus any
//! extra registrations), then only read while runs are assembled.

use std::marker::PhantomData;

use indexmap::IndexMap;
use tracing::debug;

use super::error::{RegistrationError, ReportError};
use super::{
    ConsoleReporter, EventSink, JsonReporter, JunitReporter, ListenerDescription,
    ReporterConfig, ReporterDescription, StreamingJsonReporter, TracingListener,
};

/// Builds reporters of one kind
pub trait ReporterFactory: Send + Sync {
    fn create(&self, config: ReporterConfig) -> Result<Box<dyn EventSink>, ReportError>;

    fn description(&self) -> String;
}

/// Builds listeners of one kind
pub trait ListenerFactory: Send + Sync {
    fn create(&self, config: ReporterConfig) -> Result<Box<dyn EventSink>, ReportError>;

    fn name(&self) -> String;

    fn description(&self) -> String;
}

/// A reporter type that knows how to construct itself from a `ReporterConfig`
pub trait RegisteredReporter: EventSink + Sized + 'static {
    fn description() -> String;

    fn from_config(config: ReporterConfig) -> Result<Self, ReportError>;
}

/// A listener type that knows its own name and how to construct itself
pub trait RegisteredListener: EventSink + Sized + 'static {
    fn name() -> String;

    fn description() -> String;

    fn from_config(config: ReporterConfig) -> Result<Self, ReportError>;
}

/// Factory for any `RegisteredReporter` or `RegisteredListener` type
pub struct FactoryFor<T>(PhantomData<fn() -> T>);

impl<T> FactoryFor<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for FactoryFor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: RegisteredReporter> ReporterFactory for FactoryFor<T> {
    fn create(&self, config: ReporterConfig) -> Result<Box<dyn EventSink>, ReportError> {
        Ok(Box::new(T::from_config(config)?))
    }

    fn description(&self) -> String {
        T::description()
    }
}

impl<T: RegisteredListener> ListenerFactory for FactoryFor<T> {
    fn create(&self, config: ReporterConfig) -> Result<Box<dyn EventSink>, ReportError> {
        Ok(Box::new(T::from_config(config)?))
    }

    fn name(&self) -> String {
        T::name()
    }

    fn description(&self) -> String {
        T::description()
    }
}

struct ReporterEntry {
    name: String,
    factory: Box<dyn ReporterFactory>,
}

/// Registered reporter and listener factories.
///
/// Reporter names are matched case-insensitively and kept in registration
/// order for listing.
#[derive(Default)]
pub struct ReporterRegistry {
    reporters: IndexMap<String, ReporterEntry>,
    listeners: Vec<Box<dyn ListenerFactory>>,
}

impl ReporterRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every reporter and listener shipped with the crate
    pub fn with_builtin() -> Result<Self, RegistrationError> {
        let mut registry = Self::new();
        registry.register_reporter("console", Box::new(FactoryFor::<ConsoleReporter>::new()))?;
        registry.register_reporter("json", Box::new(FactoryFor::<JsonReporter>::new()))?;
        registry.register_reporter("junit", Box::new(FactoryFor::<JunitReporter>::new()))?;
        registry.register_reporter(
            "stream",
            Box::new(FactoryFor::<StreamingJsonReporter>::new()),
        )?;
        registry.register_listener(Box::new(FactoryFor::<TracingListener>::new()));
        Ok(registry)
    }

    /// Register a reporter factory under `name`
    pub fn register_reporter(
        &mut self,
        name: &str,
        factory: Box<dyn ReporterFactory>,
    ) -> Result<(), RegistrationError> {
        if name.contains("::") {
            return Err(RegistrationError::DoubleColon(name.to_string()));
        }
        if name.is_empty() {
            return Err(RegistrationError::EmptyName);
        }

        let key = name.to_lowercase();
        if self.reporters.contains_key(&key) {
            return Err(RegistrationError::Duplicate(name.to_string()));
        }

        debug!("Registered reporter '{}'", name);
        self.reporters.insert(
            key,
            ReporterEntry {
                name: name.to_string(),
                factory,
            },
        );
        Ok(())
    }

    pub fn register_listener(&mut self, factory: Box<dyn ListenerFactory>) {
        debug!("Registered listener '{}'", factory.name());
        self.listeners.push(factory);
    }

    /// All reporter factories, in registration order
    pub fn factories(&self) -> impl Iterator<Item = (&str, &dyn ReporterFactory)> {
        self.reporters
            .values()
            .map(|entry| (entry.name.as_str(), entry.factory.as_ref()))
    }

    pub fn listeners(&self) -> impl Iterator<Item = &dyn ListenerFactory> {
        self.listeners.iter().map(|f| f.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.reporters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.reporters.len()
    }

    /// Instantiate the reporter registered as `name`
    pub fn create(
        &self,
        name: &str,
        config: ReporterConfig,
    ) -> Result<Box<dyn EventSink>, ReportError> {
        let entry = self
            .reporters
            .get(&name.to_lowercase())
            .ok_or_else(|| ReportError::UnknownReporter(name.to_string()))?;
        debug!("Creating reporter '{}'", entry.name);
        entry.factory.create(config)
    }

    /// Instantiate the listener registered as `name`
    pub fn create_listener(
        &self,
        name: &str,
        config: ReporterConfig,
    ) -> Result<Box<dyn EventSink>, ReportError> {
        let factory = self
            .listeners
            .iter()
            .find(|f| f.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| ReportError::UnknownListener(name.to_string()))?;
        debug!("Creating listener '{}'", factory.name());
        factory.create(config)
    }

    pub fn reporter_descriptions(&self) -> Vec<ReporterDescription> {
        self.factories()
            .map(|(name, factory)| ReporterDescription::new(name, factory.description()))
            .collect()
    }

    pub fn listener_descriptions(&self) -> Vec<ListenerDescription> {
        self.listeners()
            .map(|f| ListenerDescription::new(f.name(), f.description()))
            .collect()
    }
}
