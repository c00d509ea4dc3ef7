// Error types for registration and sink construction

use thiserror::Error;

/// A reporter or listener could not be registered
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// `::` is kept free for addressing options inside a reporter spec
    #[error("'::' is not allowed in reporter name: '{0}'")]
    DoubleColon(String),

    #[error("reporter name must not be empty")]
    EmptyName,

    #[error("reporter with name '{0}' already registered")]
    Duplicate(String),
}

/// Errors surfaced while assembling sinks for a run
#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error("no reporter registered with name: '{0}'")]
    UnknownReporter(String),

    #[error("no listener registered with name: '{0}'")]
    UnknownListener(String),

    /// A component was used in a way its contract forbids. Never recover from this.
    #[error("internal error: {0}")]
    InternalMisuse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReportError {
    /// Whether the error indicates a programming bug rather than bad input
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InternalMisuse(_))
    }
}
