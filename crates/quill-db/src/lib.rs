//! quill-db - Database abstraction layer for quill
//!
//! This crate provides the `Database` trait with DuckDB and PostgreSQL
//! implementations, plus the generic row mapper that turns query results
//! into `#[derive(Record)]` structs.

// Lets `#[derive(Record)]` resolve `::quill_db` paths inside this crate.
extern crate self as quill_db;

pub mod connect;
pub mod duckdb;
pub mod error;
pub mod mapper;
pub mod postgres;
pub mod record;
pub mod traits;
pub mod value;

pub use connect::{connect, Target};
pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use mapper::{query_many, query_many_into, query_one, RowMapper};
pub use postgres::PostgresBackend;
pub use quill_macros::Record;
pub use record::{assign, parse_bool, Binding, CoerceError, FromValue, Record};
pub use traits::Database;
pub use value::{ResultSet, Value};
