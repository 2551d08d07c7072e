//! quill-core - Core library for quill
//!
//! This crate provides the pieces of the migration engine that never touch a
//! database: unit naming and sanitizing, discovery of migration pairs and seed
//! files, new-unit scaffolding, configuration parsing, and the shared error
//! taxonomy.

pub mod config;
pub mod discovery;
pub mod error;
pub mod naming;
mod newtype_string;
pub mod scaffold;
pub mod unit;

pub use config::{Config, DatabaseConfig};
pub use discovery::{discover_migrations, discover_seeds, parse_migration_file_name};
pub use error::{CoreError, CoreResult, ErrorKind};
pub use naming::{sanitize_name, UnitName, Version};
pub use scaffold::{create_migration, create_seed, ensure_dir, CreatedMigration};
pub use unit::{Direction, MigrationUnit, SeedUnit};
