//! Migration runner: apply, revert, and report file-based migrations.

use crate::error::{MigrateError, MigrateResult};
use crate::status::{MigrationStatus, RunReport, UnitState};
use crate::store::{MigrationStore, MIGRATIONS_TABLE};
use chrono::Utc;
use quill_core::{
    create_migration, discover_migrations, ensure_dir, sanitize_name, CreatedMigration, Direction,
    MigrationUnit, Version,
};
use quill_db::Database;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Scaffold a new migration pair under `dir`, versioned with the current
/// UTC time. Needs no database.
pub fn new_migration(dir: &Path, input: &str) -> MigrateResult<CreatedMigration> {
    let name = sanitize_name("migration", input)?;
    let created = create_migration(dir, &name, Version::from_timestamp(Utc::now()))?;
    log::info!("Created {}", created.up_path.display());
    log::info!("Created {}", created.down_path.display());
    Ok(created)
}

/// Convert a step count from the command line.
pub fn parse_steps(raw: i64) -> MigrateResult<usize> {
    match usize::try_from(raw) {
        Ok(steps) if steps > 0 => Ok(steps),
        _ => Err(MigrateError::InvalidSteps(raw)),
    }
}

pub(crate) fn read_script(path: &Path) -> MigrateResult<String> {
    std::fs::read_to_string(path).map_err(|source| MigrateError::ReadScript {
        path: path.display().to_string(),
        source,
    })
}

/// Reconciles the migration files in one directory with `schema_migrations`.
///
/// Nothing is cached between calls; every operation rescans the directory
/// and re-reads the tracking table.
pub struct MigrationRunner<'a> {
    db: &'a dyn Database,
    store: MigrationStore<'a>,
    dir: PathBuf,
}

impl<'a> MigrationRunner<'a> {
    pub fn new(db: &'a dyn Database, dir: impl Into<PathBuf>) -> Self {
        Self {
            db,
            store: MigrationStore::new(db),
            dir: dir.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the migrations directory and tracking table.
    pub async fn init(&self) -> MigrateResult<()> {
        ensure_dir(&self.dir)?;
        self.store.ensure_table().await?;
        log::info!(
            "Initialized migrations in {} ({})",
            self.dir.display(),
            self.db.db_type()
        );
        Ok(())
    }

    /// Apply every pending migration in version order.
    ///
    /// Stops at the first failure; migrations applied before it stay applied
    /// and recorded. Refuses to run any script until `init` has created the
    /// tracking table.
    pub async fn up(&self) -> MigrateResult<RunReport> {
        if !self.store.table_exists().await? {
            return Err(MigrateError::NotInitialized {
                table: MIGRATIONS_TABLE,
                init: "init",
            });
        }
        ensure_dir(&self.dir)?;
        let units = discover_migrations(&self.dir)?;
        let applied: HashSet<String> = self
            .store
            .list()
            .await?
            .into_iter()
            .map(|m| m.version)
            .collect();

        let mut report = RunReport::default();
        for unit in units
            .iter()
            .filter(|u| !applied.contains(u.version.as_str()))
        {
            self.apply(unit).await?;
            report.units.push(unit.version.to_string());
        }

        if report.is_empty() {
            log::info!("No pending migrations");
        }
        Ok(report)
    }

    async fn apply(&self, unit: &MigrationUnit) -> MigrateResult<()> {
        let path = unit
            .script(Direction::Up)
            .ok_or_else(|| MigrateError::MissingUpScript {
                version: unit.version.to_string(),
            })?;
        let sql = read_script(path)?;
        log::debug!("Running {}", path.display());

        self.db
            .execute_batch(&sql)
            .await
            .map_err(|source| MigrateError::Apply {
                version: unit.version.to_string(),
                name: unit.name.clone(),
                source,
            })?;
        self.store
            .insert(unit.version.as_str(), &unit.name)
            .await
            .map_err(|source| MigrateError::Record {
                what: "migration",
                key: unit.version.to_string(),
                source,
            })?;

        log::info!("Applied {} {}", unit.version, unit.name);
        Ok(())
    }

    /// Revert up to `steps` of the most recently applied migrations, newest
    /// first. Asking for more than are applied reverts all of them.
    pub async fn down(&self, steps: usize) -> MigrateResult<RunReport> {
        if steps == 0 {
            return Err(MigrateError::InvalidSteps(0));
        }
        ensure_dir(&self.dir)?;
        let units = discover_migrations(&self.dir)?;
        let by_version: HashMap<&str, &MigrationUnit> =
            units.iter().map(|u| (u.version.as_str(), u)).collect();
        let applied = self.store.list().await?;

        let mut report = RunReport::default();
        if applied.is_empty() {
            log::info!("No applied migrations to revert");
            return Ok(report);
        }

        for record in applied.iter().rev().take(steps) {
            let version = record.version.as_str();
            let path = by_version
                .get(version)
                .and_then(|u| u.script(Direction::Down))
                .ok_or_else(|| MigrateError::MissingDownScript {
                    version: version.to_string(),
                })?;
            let sql = read_script(path)?;
            log::debug!("Running {}", path.display());

            self.db
                .execute_batch(&sql)
                .await
                .map_err(|source| MigrateError::Revert {
                    version: version.to_string(),
                    source,
                })?;
            self.store
                .delete(version)
                .await
                .map_err(|source| MigrateError::Record {
                    what: "revert of migration",
                    key: version.to_string(),
                    source,
                })?;

            log::info!("Reverted {version}");
            report.units.push(version.to_string());
        }
        Ok(report)
    }

    /// Every discovered migration with its applied/pending state.
    pub async fn status(&self) -> MigrateResult<Vec<MigrationStatus>> {
        ensure_dir(&self.dir)?;
        let units = discover_migrations(&self.dir)?;
        let applied: HashMap<String, _> = self
            .store
            .list()
            .await?
            .into_iter()
            .map(|m| (m.version, m.applied_at))
            .collect();

        Ok(units
            .into_iter()
            .map(|unit| {
                let recorded = applied.get(unit.version.as_str());
                MigrationStatus {
                    version: unit.version.into_inner(),
                    name: unit.name,
                    state: if recorded.is_some() {
                        UnitState::Applied
                    } else {
                        UnitState::Pending
                    },
                    applied_at: recorded.copied().flatten(),
                }
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
