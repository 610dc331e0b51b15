use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Authentication required: {0}")]
    #[diagnostic(code(calsearch::authentication_required))]
    AuthenticationRequired(String),

    #[error("Invalid request: {0}")]
    #[diagnostic(code(calsearch::validation))]
    Validation(String),

    #[error("Calendar source error: {0}")]
    #[diagnostic(code(calsearch::source_fetch))]
    SourceFetch(String),

    #[error("Calendar list error: {0}")]
    #[diagnostic(code(calsearch::directory))]
    Directory(String),

    #[error("Search aggregation failed: {0}")]
    #[diagnostic(code(calsearch::aggregate))]
    Aggregate(String),

    #[error("Environment error: {0}")]
    #[diagnostic(code(calsearch::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(calsearch::config))]
    Config(String),

    #[error(transparent)]
    #[diagnostic(code(calsearch::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(calsearch::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(calsearch::other))]
    Other(String),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type SearchResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Invalid environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create validation errors
pub fn validation_error(message: &str) -> Error {
    Error::Validation(message.to_string())
}

/// Helper to create per-source fetch errors
pub fn source_error(message: &str) -> Error {
    Error::SourceFetch(message.to_string())
}

/// Helper to create authentication errors
pub fn auth_error(message: &str) -> Error {
    Error::AuthenticationRequired(message.to_string())
}

/// Helper to create calendar listing errors
pub fn directory_error(message: &str) -> Error {
    Error::Directory(message.to_string())
}

/// Helper to create aggregation errors
pub fn aggregate_error(message: &str) -> Error {
    Error::Aggregate(message.to_string())
}
