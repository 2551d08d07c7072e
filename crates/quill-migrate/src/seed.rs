//! Seed runner: apply-once SQL scripts keyed by file name.

use crate::error::{MigrateError, MigrateResult};
use crate::runner::read_script;
use crate::status::{RunReport, SeedStatus, UnitState};
use crate::store::{SeedStore, SEEDS_TABLE};
use quill_core::{create_seed, discover_seeds, ensure_dir, sanitize_name, SeedUnit};
use quill_db::Database;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Scaffold `<name>.sql` under `dir`. Needs no database.
pub fn new_seed(dir: &Path, input: &str) -> MigrateResult<PathBuf> {
    let name = sanitize_name("seed", input)?;
    let path = create_seed(dir, &name)?;
    log::info!("Created {}", path.display());
    Ok(path)
}

/// Reconciles the seed files in one directory with `schema_seeds`.
pub struct SeedRunner<'a> {
    db: &'a dyn Database,
    store: SeedStore<'a>,
    dir: PathBuf,
}

impl<'a> SeedRunner<'a> {
    pub fn new(db: &'a dyn Database, dir: impl Into<PathBuf>) -> Self {
        Self {
            db,
            store: SeedStore::new(db),
            dir: dir.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the seeds directory and tracking table.
    pub async fn init(&self) -> MigrateResult<()> {
        ensure_dir(&self.dir)?;
        self.store.ensure_table().await?;
        log::info!("Initialized seeds in {}", self.dir.display());
        Ok(())
    }

    /// Run every seed not yet recorded, in file-name order.
    pub async fn apply(&self) -> MigrateResult<RunReport> {
        if !self.store.table_exists().await? {
            return Err(MigrateError::NotInitialized {
                table: SEEDS_TABLE,
                init: "seed-init",
            });
        }
        ensure_dir(&self.dir)?;
        let seeds = discover_seeds(&self.dir)?;
        let applied: HashSet<String> = self
            .store
            .list()
            .await?
            .into_iter()
            .map(|s| s.file_name)
            .collect();

        let mut report = RunReport::default();
        for seed in seeds.iter().filter(|s| !applied.contains(&s.file_name)) {
            self.apply_one(seed).await?;
            report.units.push(seed.file_name.clone());
        }

        if report.is_empty() {
            log::info!("No pending seeds");
        }
        Ok(report)
    }

    async fn apply_one(&self, seed: &SeedUnit) -> MigrateResult<()> {
        let sql = read_script(&seed.script)?;
        log::debug!("Running {}", seed.script.display());

        self.db
            .execute_batch(&sql)
            .await
            .map_err(|source| MigrateError::Seed {
                file: seed.file_name.clone(),
                source,
            })?;
        self.store
            .insert(&seed.file_name)
            .await
            .map_err(|source| MigrateError::Record {
                what: "seed",
                key: seed.file_name.clone(),
                source,
            })?;

        log::info!("Seed applied: {}", seed.file_name);
        Ok(())
    }

    /// Every discovered seed with its applied/pending state.
    pub async fn status(&self) -> MigrateResult<Vec<SeedStatus>> {
        ensure_dir(&self.dir)?;
        let seeds = discover_seeds(&self.dir)?;
        let applied: HashMap<String, _> = self
            .store
            .list()
            .await?
            .into_iter()
            .map(|s| (s.file_name, s.applied_at))
            .collect();

        Ok(seeds
            .into_iter()
            .map(|seed| {
                let recorded = applied.get(&seed.file_name);
                SeedStatus {
                    state: if recorded.is_some() {
                        UnitState::Applied
                    } else {
                        UnitState::Pending
                    },
                    applied_at: recorded.copied().flatten(),
                    file_name: seed.file_name,
                }
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "seed_test.rs"]
mod tests;
