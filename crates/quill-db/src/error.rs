//! Error types for quill-db

use crate::record::CoerceError;
use quill_core::ErrorKind;
use thiserror::Error;

/// Boxed driver error kept as the cause of a [`DbError`].
pub type DriverError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Database operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection or ping failure (D001)
    #[error("[D001] Database connection failed: {message}")]
    ConnectionError {
        message: String,
        #[source]
        source: Option<DriverError>,
    },

    /// Query execution error (D002)
    #[error("[D002] SQL execution failed: {message}")]
    ExecutionError {
        message: String,
        #[source]
        source: Option<DriverError>,
    },

    /// Table not found (D003)
    #[error("[D003] Table or view not found: {0}")]
    TableNotFound(String),

    /// Single-row query returned nothing (D004)
    #[error("[D004] Query returned no rows: {query}")]
    NoRows { query: String },

    /// Column value could not be coerced into a record field (D005)
    #[error("[D005] Cannot set field '{field}' from column '{column}'")]
    Coercion {
        column: String,
        field: &'static str,
        #[source]
        source: CoerceError,
    },

    /// Unsupported or malformed connection URL (D006)
    #[error("[D006] Unsupported database URL '{0}': expected postgres://, postgresql://, or duckdb://")]
    InvalidUrl(String),

    /// Mutex poisoned (D007)
    #[error("[D007] Database mutex poisoned: {0}")]
    MutexPoisoned(String),
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;

impl DbError {
    /// Execution error with a preserved driver cause.
    pub fn execution(message: impl Into<String>, source: impl Into<DriverError>) -> Self {
        DbError::ExecutionError {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Connection error with a preserved driver cause.
    pub fn connection(message: impl Into<String>, source: impl Into<DriverError>) -> Self {
        DbError::ConnectionError {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Classify this error for the operator.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DbError::ConnectionError { .. } => ErrorKind::Unavailable,
            DbError::NoRows { .. } => ErrorKind::NotFound,
            DbError::InvalidUrl(_) => ErrorKind::InvalidArgument,
            DbError::ExecutionError { .. }
            | DbError::TableNotFound(_)
            | DbError::Coercion { .. }
            | DbError::MutexPoisoned(_) => ErrorKind::Internal,
        }
    }

    /// True when the error means the queried relation does not exist yet.
    pub fn is_table_not_found(&self) -> bool {
        matches!(self, DbError::TableNotFound(_))
    }
}

impl From<duckdb::Error> for DbError {
    fn from(err: duckdb::Error) -> Self {
        // duckdb::Error does not expose structured variants, so string
        // matching is the only reliable approach. Narrow patterns keep
        // function/type/schema errors out of TableNotFound.
        let msg = err.to_string();
        let names_relation = msg.contains("Table with name")
            || msg.contains("View with name")
            || msg.contains("Table or view with name")
            || (msg.contains("Catalog Error") && msg.contains("Table"));
        let missing = msg.contains("does not exist") || msg.contains("not found");
        if names_relation && missing {
            DbError::TableNotFound(msg)
        } else {
            DbError::execution(msg, err)
        }
    }
}

impl From<tokio_postgres::Error> for DbError {
    fn from(err: tokio_postgres::Error) -> Self {
        use tokio_postgres::error::SqlState;

        match err.code() {
            Some(code) if *code == SqlState::UNDEFINED_TABLE => DbError::TableNotFound(
                err.as_db_error()
                    .map(|e| e.message().to_string())
                    .unwrap_or_else(|| err.to_string()),
            ),
            _ => {
                let message = match err.as_db_error() {
                    Some(db_err) => format!("{}: {}", db_err.code().code(), db_err.message()),
                    None => err.to_string(),
                };
                if err.is_closed() {
                    DbError::connection(message, err)
                } else {
                    DbError::execution(message, err)
                }
            }
        }
    }
}
