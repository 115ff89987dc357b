//! Error types for archgraph-extension

use std::fmt;
use thiserror::Error;

/// Extension error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or duplicate extension identifier, invalid configuration
    Configuration,
    /// Lifecycle misuse, e.g. finishing a snapshot that was never evaluated
    State,
    /// Report generation failed
    Report,
    /// I/O errors
    IO,
    /// Serialization/deserialization errors
    Serialization,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Configuration => "configuration",
            ErrorKind::State => "state",
            ErrorKind::Report => "report",
            ErrorKind::IO => "io",
            ErrorKind::Serialization => "serialization",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Extension error type
#[derive(Debug, Error)]
#[error("[{kind}] {message}")]
pub struct ExtensionError {
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
    pub kind: ErrorKind,
    pub message: String,
}

impl ExtensionError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    pub fn illegal_identifier(identifier: &str, reason: &str) -> Self {
        Self::configuration(format!(
            "Extension identifier '{}' is illegal: {}",
            identifier, reason
        ))
    }

    pub fn duplicate_identifier(identifier: &str) -> Self {
        Self::configuration(format!(
            "Extension identifier '{}' is already registered",
            identifier
        ))
    }

    pub fn unknown_snapshot(description: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::State,
            format!("{} was not part of any evaluation", description.into()),
        )
    }

    pub fn report(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Report, message)
    }
}

impl From<std::io::Error> for ExtensionError {
    fn from(err: std::io::Error) -> Self {
        ExtensionError::new(ErrorKind::IO, format!("I/O error: {}", err)).with_source(err)
    }
}

impl From<serde_json::Error> for ExtensionError {
    fn from(err: serde_json::Error) -> Self {
        ExtensionError::new(ErrorKind::Serialization, format!("JSON error: {}", err))
            .with_source(err)
    }
}

impl From<serde_yaml::Error> for ExtensionError {
    fn from(err: serde_yaml::Error) -> Self {
        ExtensionError::new(ErrorKind::Serialization, format!("YAML error: {}", err))
            .with_source(err)
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ExtensionError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_illegal_identifier_display() {
        let err = ExtensionError::illegal_identifier("foo.bar", "contains '.'");
        assert_eq!(err.kind, ErrorKind::Configuration);

        let msg = format!("{}", err);
        assert!(msg.starts_with("[configuration]"));
        assert!(msg.contains("foo.bar"));
    }

    #[test]
    fn test_unknown_snapshot() {
        let err = ExtensionError::unknown_snapshot("Snapshot 'core'");
        assert_eq!(err.kind, ErrorKind::State);
        assert_eq!(
            err.to_string(),
            "[state] Snapshot 'core' was not part of any evaluation"
        );
    }

    #[test]
    fn test_from_io_error_keeps_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: ExtensionError = io_err.into();

        assert_eq!(err.kind, ErrorKind::IO);
        assert!(err.source().unwrap().to_string().contains("read-only"));
    }

    #[test]
    fn test_from_yaml_error() {
        let yaml_err = serde_yaml::from_str::<Vec<String>>("{ not: a list }")
            .err()
            .unwrap();
        let err: ExtensionError = yaml_err.into();

        assert_eq!(err.kind, ErrorKind::Serialization);
        assert!(err.message.contains("YAML error"));
    }

    #[test]
    fn test_error_kind_as_str() {
        assert_eq!(ErrorKind::Configuration.as_str(), "configuration");
        assert_eq!(ErrorKind::State.as_str(), "state");
        assert_eq!(ErrorKind::Report.as_str(), "report");
        assert_eq!(ErrorKind::IO.as_str(), "io");
        assert_eq!(ErrorKind::Serialization.as_str(), "serialization");
    }
}
