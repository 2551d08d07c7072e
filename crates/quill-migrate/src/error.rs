//! Error types for migration and seed runs.

use quill_core::{CoreError, ErrorKind};
use quill_db::DbError;
use thiserror::Error;

/// Migration and seed runner errors.
#[derive(Error, Debug)]
pub enum MigrateError {
    /// Revert step count was zero or negative (M001).
    #[error("[M001] --steps must be >= 1, got {0}")]
    InvalidSteps(i64),

    /// A pending migration has no up script (M002).
    #[error("[M002] missing up migration for version {version}")]
    MissingUpScript { version: String },

    /// An applied migration has no discovered down script (M003).
    #[error("[M003] missing down migration for version {version}")]
    MissingDownScript { version: String },

    /// Script file could not be read (M004).
    #[error("[M004] Failed to read script {path}")]
    ReadScript {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Up script failed to execute (M005).
    #[error("[M005] Failed to apply migration {version} {name}")]
    Apply {
        version: String,
        name: String,
        #[source]
        source: DbError,
    },

    /// Down script failed to execute (M006).
    #[error("[M006] Failed to revert migration {version}")]
    Revert {
        version: String,
        #[source]
        source: DbError,
    },

    /// Seed script failed to execute (M007).
    #[error("[M007] Failed to apply seed {file}")]
    Seed {
        file: String,
        #[source]
        source: DbError,
    },

    /// Tracking table write failed after the script ran (M008).
    #[error("[M008] Failed to record {what} {key}")]
    Record {
        what: &'static str,
        key: String,
        #[source]
        source: DbError,
    },

    /// Tracking table has not been created yet (M010).
    #[error("[M010] {table} does not exist; run `quill {init}` first")]
    NotInitialized {
        table: &'static str,
        init: &'static str,
    },

    /// Tracking table access failed (M009).
    #[error("[M009] Tracking table access failed")]
    Store(#[from] DbError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type alias for [`MigrateError`].
pub type MigrateResult<T> = Result<T, MigrateError>;

impl MigrateError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MigrateError::InvalidSteps(_) | MigrateError::NotInitialized { .. } => {
                ErrorKind::InvalidArgument
            }
            MigrateError::MissingUpScript { .. }
            | MigrateError::MissingDownScript { .. }
            | MigrateError::ReadScript { .. } => ErrorKind::Internal,
            MigrateError::Apply { source, .. }
            | MigrateError::Revert { source, .. }
            | MigrateError::Seed { source, .. }
            | MigrateError::Record { source, .. }
            | MigrateError::Store(source) => match source.kind() {
                ErrorKind::Unavailable => ErrorKind::Unavailable,
                _ => ErrorKind::Internal,
            },
            MigrateError::Core(e) => e.kind(),
        }
    }
}
