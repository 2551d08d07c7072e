//! Connection-URL dispatch to a concrete backend.

use crate::duckdb::DuckDbBackend;
use crate::error::{DbError, DbResult};
use crate::postgres::PostgresBackend;
use crate::traits::Database;

/// Backend selected by the scheme of a connection URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Full URL, handed to tokio-postgres unchanged
    Postgres(String),
    /// File path, or `:memory:`
    DuckDb(String),
}

impl Target {
    pub fn parse(url: &str) -> DbResult<Self> {
        let url = url.trim();
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            return Ok(Target::Postgres(url.to_string()));
        }
        if let Some(path) = url.strip_prefix("duckdb://") {
            let path = if path.is_empty() { ":memory:" } else { path };
            return Ok(Target::DuckDb(path.to_string()));
        }
        Err(DbError::InvalidUrl(url.to_string()))
    }
}

/// Open a connection for `url` and verify it with a ping.
pub async fn connect(url: &str) -> DbResult<Box<dyn Database>> {
    let db: Box<dyn Database> = match Target::parse(url)? {
        Target::Postgres(url) => Box::new(PostgresBackend::connect(&url).await?),
        Target::DuckDb(path) => Box::new(DuckDbBackend::new(&path)?),
    };
    db.ping().await?;
    log::debug!("Connected to {} database", db.db_type());
    Ok(db)
}
