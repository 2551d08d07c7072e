//! Database trait definition

use crate::error::DbResult;
use crate::value::{ResultSet, Value};
use async_trait::async_trait;

/// Database abstraction trait for quill
///
/// Implementations must be Send + Sync for async operation. Parameters use
/// `$1`, `$2`, ... placeholders, which both backends understand.
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute one statement that modifies data, returns affected rows
    async fn execute(&self, sql: &str, params: &[Value]) -> DbResult<u64>;

    /// Execute a script of one or more statements verbatim
    async fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Run a query and materialize every row
    ///
    /// Fails with `DbError::TableNotFound` when the query references a
    /// relation that does not exist.
    async fn query(&self, sql: &str, params: &[Value]) -> DbResult<ResultSet>;

    /// Check if a table or view exists
    async fn relation_exists(&self, name: &str) -> DbResult<bool>;

    /// Round-trip to the server to prove the connection is usable
    async fn ping(&self) -> DbResult<()>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}
