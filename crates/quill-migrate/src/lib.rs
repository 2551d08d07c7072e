//! Migration and seed runners for quill.
//!
//! Reconciles `<version>_<name>.{up,down}.sql` pairs and `<name>.sql` seeds
//! on disk with the `schema_migrations` and `schema_seeds` tracking tables.

pub mod error;
pub mod runner;
pub mod seed;
pub mod status;
pub mod store;

pub use error::{MigrateError, MigrateResult};
pub use runner::{new_migration, parse_steps, MigrationRunner};
pub use seed::{new_seed, SeedRunner};
pub use status::{MigrationStatus, RunReport, SeedStatus, UnitState};
pub use store::{AppliedMigration, AppliedSeed, MigrationStore, SeedStore};
