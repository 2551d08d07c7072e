//! Error types for quill-core

use thiserror::Error;

/// Operator-facing classification shared by every quill error type.
///
/// The CLI reports all kinds the same way (one message, non-zero exit); the
/// kind exists so library callers and tests can tell failures apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad flags, empty names, non-positive step counts, unsupported URLs.
    InvalidArgument,
    /// A single-row query produced no rows.
    NotFound,
    /// I/O, SQL execution, coercion, or malformed unit directory.
    Internal,
    /// The database could not be reached.
    Unavailable,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::InvalidArgument => write!(f, "invalid argument"),
            ErrorKind::NotFound => write!(f, "not found"),
            ErrorKind::Internal => write!(f, "internal"),
            ErrorKind::Unavailable => write!(f, "unavailable"),
        }
    }
}

/// Core error type for quill
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Failed to parse configuration file
    #[error("[E002] Failed to parse config: {message}")]
    ConfigParseError { message: String },

    /// E003: Invalid configuration value
    #[error("[E003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E004: Unit name is empty or has no usable characters
    #[error("[E004] Invalid {what} name '{input}': {reason}")]
    InvalidName {
        what: &'static str,
        input: String,
        reason: String,
    },

    /// E005: Refusing to overwrite an existing unit file
    #[error("[E005] File already exists: {path}")]
    FileExists { path: String },

    /// E006: Directory could not be created
    #[error("[E006] Failed to create directory {path}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// E007: Directory could not be scanned
    #[error("[E007] Failed to read directory {path}")]
    ReadDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// E008: IO error with file path context
    #[error("[E008] IO error at {path}")]
    IoWithPath {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Classify this error for the operator.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::ConfigInvalid { .. }
            | CoreError::InvalidName { .. }
            | CoreError::FileExists { .. } => ErrorKind::InvalidArgument,
            CoreError::ConfigNotFound { .. }
            | CoreError::ConfigParseError { .. }
            | CoreError::CreateDir { .. }
            | CoreError::ReadDir { .. }
            | CoreError::IoWithPath { .. } => ErrorKind::Internal,
        }
    }
}

impl From<serde_yaml::Error> for CoreError {
    fn from(err: serde_yaml::Error) -> Self {
        CoreError::ConfigParseError {
            message: err.to_string(),
        }
    }
}
