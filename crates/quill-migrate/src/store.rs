//! Applied-state tracking tables.
//!
//! One table per artifact kind. Rows are created once per successful apply
//! and, for migrations, deleted once per successful revert.

use chrono::NaiveDateTime;
use quill_db::{query_many, Database, DbError, DbResult, Record, Value};
use serde::Serialize;

pub const MIGRATIONS_TABLE: &str = "schema_migrations";
pub const SEEDS_TABLE: &str = "schema_seeds";

const CREATE_MIGRATIONS_TABLE: &str = "CREATE TABLE IF NOT EXISTS schema_migrations (
    version VARCHAR(64) PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at TIMESTAMP NOT NULL
)";

const CREATE_SEEDS_TABLE: &str = "CREATE TABLE IF NOT EXISTS schema_seeds (
    name TEXT PRIMARY KEY,
    applied_at TIMESTAMP NOT NULL
)";

/// A row of `schema_migrations`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Record)]
pub struct AppliedMigration {
    pub version: String,
    pub name: String,
    pub applied_at: Option<NaiveDateTime>,
}

/// A row of `schema_seeds`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Record)]
pub struct AppliedSeed {
    #[record(column = "name")]
    pub file_name: String,
    pub applied_at: Option<NaiveDateTime>,
}

/// A missing tracking table means nothing has been applied yet.
fn empty_if_missing<T>(result: DbResult<Vec<T>>, table: &str) -> DbResult<Vec<T>> {
    match result {
        Err(DbError::TableNotFound(msg)) => {
            log::debug!("{table} does not exist yet, treating as empty: {msg}");
            Ok(Vec::new())
        }
        other => other,
    }
}

/// Tracking store for applied migrations.
pub struct MigrationStore<'a> {
    db: &'a dyn Database,
}

impl<'a> MigrationStore<'a> {
    pub fn new(db: &'a dyn Database) -> Self {
        Self { db }
    }

    pub async fn ensure_table(&self) -> DbResult<()> {
        self.db.execute_batch(CREATE_MIGRATIONS_TABLE).await
    }

    pub async fn table_exists(&self) -> DbResult<bool> {
        self.db.relation_exists(MIGRATIONS_TABLE).await
    }

    pub async fn insert(&self, version: &str, name: &str) -> DbResult<()> {
        self.db
            .execute(
                "INSERT INTO schema_migrations (version, name, applied_at) VALUES ($1, $2, CURRENT_TIMESTAMP)",
                &[Value::from(version), Value::from(name)],
            )
            .await?;
        Ok(())
    }

    pub async fn delete(&self, version: &str) -> DbResult<()> {
        self.db
            .execute(
                "DELETE FROM schema_migrations WHERE version = $1",
                &[Value::from(version)],
            )
            .await?;
        Ok(())
    }

    /// Applied migrations ordered by version ascending.
    pub async fn list(&self) -> DbResult<Vec<AppliedMigration>> {
        let result = query_many(
            self.db,
            "SELECT version, name, applied_at FROM schema_migrations ORDER BY version",
            &[],
        )
        .await;
        empty_if_missing(result, MIGRATIONS_TABLE)
    }
}

/// Tracking store for applied seeds.
pub struct SeedStore<'a> {
    db: &'a dyn Database,
}

impl<'a> SeedStore<'a> {
    pub fn new(db: &'a dyn Database) -> Self {
        Self { db }
    }

    pub async fn ensure_table(&self) -> DbResult<()> {
        self.db.execute_batch(CREATE_SEEDS_TABLE).await
    }

    pub async fn table_exists(&self) -> DbResult<bool> {
        self.db.relation_exists(SEEDS_TABLE).await
    }

    pub async fn insert(&self, file_name: &str) -> DbResult<()> {
        self.db
            .execute(
                "INSERT INTO schema_seeds (name, applied_at) VALUES ($1, CURRENT_TIMESTAMP)",
                &[Value::from(file_name)],
            )
            .await?;
        Ok(())
    }

    /// Applied seeds ordered by file name.
    pub async fn list(&self) -> DbResult<Vec<AppliedSeed>> {
        let result = query_many(
            self.db,
            "SELECT name, applied_at FROM schema_seeds ORDER BY name",
            &[],
        )
        .await;
        empty_if_missing(result, SEEDS_TABLE)
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
