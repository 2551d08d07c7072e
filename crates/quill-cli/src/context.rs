//! Runtime context for CLI commands

use anyhow::{Context, Result};
use quill_core::Config;
use quill_db::Database;
use quill_migrate::{MigrationRunner, SeedRunner};
use std::path::{Path, PathBuf};

use crate::cli::GlobalArgs;

/// Directories and connection URL after merging flags, environment, config
/// file, and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub migrations_dir: PathBuf,
    pub seeds_dir: PathBuf,
    pub database_url: Option<String>,
}

impl Settings {
    /// Resolve settings from global arguments.
    ///
    /// Config directories are relative to the config file's directory; flag
    /// directories are relative to the working directory.
    pub fn resolve(args: &GlobalArgs) -> Result<Self> {
        let (config, root) = match &args.config {
            Some(path) => {
                let path = Path::new(path);
                let config = Config::load(path).context("Failed to load configuration file")?;
                let root = path
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| PathBuf::from("."));
                (config, root)
            }
            None => (
                Config::load_from_dir(Path::new("."))
                    .context("Failed to load project configuration")?,
                PathBuf::from("."),
            ),
        };
        Ok(Self::merge(args, config, &root))
    }

    fn merge(args: &GlobalArgs, mut config: Config, root: &Path) -> Self {
        let migrations_dir = match &args.dir {
            Some(dir) => PathBuf::from(dir),
            None => config.migrations_dir_absolute(root),
        };
        let seeds_dir = match &args.seed_dir {
            Some(dir) => PathBuf::from(dir),
            None => config.seeds_dir_absolute(root),
        };

        let database_url = match &args.database_url {
            Some(url) if !url.trim().is_empty() => Some(url.clone()),
            _ => {
                config.database.apply_env();
                config.database.connection_url()
            }
        };

        Self {
            migrations_dir,
            seeds_dir,
            database_url,
        }
    }
}

/// Runtime context containing resolved settings and an open connection
pub struct RuntimeContext {
    pub settings: Settings,

    /// Database connection, closed when the context is dropped
    pub db: Box<dyn Database>,
}

impl RuntimeContext {
    /// Resolve settings and connect to the configured database
    pub async fn new(args: &GlobalArgs) -> Result<Self> {
        let settings = Settings::resolve(args)?;
        let url = settings.database_url.as_deref().context(
            "No database configured: pass --database-url, set DATABASE_URL, \
             or set database settings in quill.yml",
        )?;
        let db = quill_db::connect(url)
            .await
            .context("Failed to connect to database")?;
        log::debug!(
            "Using migrations in {} and seeds in {}",
            settings.migrations_dir.display(),
            settings.seeds_dir.display()
        );
        Ok(Self { settings, db })
    }

    pub fn migrations(&self) -> MigrationRunner<'_> {
        MigrationRunner::new(self.db.as_ref(), &self.settings.migrations_dir)
    }

    pub fn seeds(&self) -> SeedRunner<'_> {
        SeedRunner::new(self.db.as_ref(), &self.settings.seeds_dir)
    }
}

#[cfg(test)]
#[path = "context_test.rs"]
mod tests;
