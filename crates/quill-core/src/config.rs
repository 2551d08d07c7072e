//! Configuration types and parsing for quill.yml

use crate::error::{CoreError, CoreResult};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File names searched by [`Config::load_from_dir`], in order.
pub const CONFIG_FILE_NAMES: &[&str] = &["quill.yml", "quill.yaml"];

/// Environment variables consulted for connection parts missing from the
/// config file.
pub const ENV_DB_USER: &str = "DB_USER";
pub const ENV_DB_PASS: &str = "DB_PASS";
pub const ENV_DB_HOST: &str = "DB_IP";
pub const ENV_DB_PORT: &str = "DB_PORT";
pub const ENV_DB_NAME: &str = "DB_DATABASE";

/// Everything but RFC 3986 unreserved characters is escaped inside URL
/// userinfo and path segments.
const URL_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Main configuration from quill.yml
///
/// Every field is optional; a project without a config file runs on defaults
/// plus whatever the CLI and environment supply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding `<version>_<name>.{up,down}.sql` pairs
    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: String,

    /// Directory holding `<name>.sql` seed scripts
    #[serde(default = "default_seeds_dir")]
    pub seeds_dir: String,

    /// Database connection configuration
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Database connection configuration
///
/// Either a full `url`, or the individual parts of a PostgreSQL URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Full connection URL; wins over the individual parts
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub user: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    #[serde(default)]
    pub host: Option<String>,

    #[serde(default)]
    pub port: Option<u16>,

    /// Database name
    #[serde(default)]
    pub name: Option<String>,

    /// libpq `sslmode` appended to composed URLs (default: disable)
    #[serde(default = "default_sslmode")]
    pub sslmode: String,
}

fn default_migrations_dir() -> String {
    "db/migrations".to_string()
}

fn default_seeds_dir() -> String {
    "db/seeds".to_string()
}

fn default_sslmode() -> String {
    "disable".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            migrations_dir: default_migrations_dir(),
            seeds_dir: default_seeds_dir(),
            database: DatabaseConfig::default(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            user: None,
            password: None,
            host: None,
            port: None,
            name: None,
            sslmode: default_sslmode(),
        }
    }
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a directory
    /// Looks for quill.yml or quill.yaml, falling back to defaults
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        for name in CONFIG_FILE_NAMES {
            let path = dir.join(name);
            if path.exists() {
                log::debug!("Loading config from {}", path.display());
                return Self::load(&path);
            }
        }
        Ok(Self::default())
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.migrations_dir.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "migrations_dir cannot be empty".to_string(),
            });
        }
        if self.seeds_dir.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "seeds_dir cannot be empty".to_string(),
            });
        }
        if let Some(url) = &self.database.url {
            if url.trim().is_empty() {
                return Err(CoreError::ConfigInvalid {
                    message: "database.url cannot be empty when set".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Migrations directory resolved against `root`
    pub fn migrations_dir_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.migrations_dir)
    }

    /// Seeds directory resolved against `root`
    pub fn seeds_dir_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.seeds_dir)
    }
}

impl DatabaseConfig {
    /// Fill connection parts that are still unset from `DB_*` environment
    /// variables. Empty variables count as unset.
    pub fn apply_env(&mut self) {
        fill_from_env(&mut self.user, ENV_DB_USER);
        fill_from_env(&mut self.password, ENV_DB_PASS);
        fill_from_env(&mut self.host, ENV_DB_HOST);
        fill_from_env(&mut self.name, ENV_DB_NAME);
        if self.port.is_none() {
            if let Some(raw) = env_non_empty(ENV_DB_PORT) {
                match raw.parse() {
                    Ok(port) => self.port = Some(port),
                    Err(_) => log::warn!("Ignoring {ENV_DB_PORT}={raw}: not a valid port"),
                }
            }
        }
    }

    /// Connection URL: the explicit `url` when set, otherwise a PostgreSQL URL
    /// composed from user, password, host, port, and name.
    ///
    /// Returns `None` when neither is available. Host defaults to `localhost`
    /// and port to `5432` once at least user and database name are known.
    /// User, password, and database name are percent-encoded.
    pub fn connection_url(&self) -> Option<String> {
        if let Some(url) = &self.url {
            return Some(url.clone());
        }
        let user = utf8_percent_encode(self.user.as_deref()?, URL_COMPONENT);
        let name = utf8_percent_encode(self.name.as_deref()?, URL_COMPONENT);
        let host = self.host.as_deref().unwrap_or("localhost");
        let port = self.port.unwrap_or(5432);
        let credentials = match self.password.as_deref() {
            Some(password) => format!("{user}:{}", utf8_percent_encode(password, URL_COMPONENT)),
            None => user.to_string(),
        };
        Some(format!(
            "postgres://{credentials}@{host}:{port}/{name}?sslmode={}",
            self.sslmode
        ))
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn fill_from_env(slot: &mut Option<String>, key: &str) {
    if slot.is_none() {
        *slot = env_non_empty(key);
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
