//! New-unit file writers and directory creation.

use crate::error::{CoreError, CoreResult};
use crate::naming::{UnitName, Version};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Files written for a new migration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedMigration {
    pub version: Version,
    pub up_path: PathBuf,
    pub down_path: PathBuf,
}

/// Create `dir` and its parents if missing.
pub fn ensure_dir(dir: &Path) -> CoreResult<()> {
    std::fs::create_dir_all(dir).map_err(|source| CoreError::CreateDir {
        path: dir.display().to_string(),
        source,
    })
}

/// Write an empty up/down pair for `name` under `dir`.
///
/// Neither file may already exist. When the down file cannot be written the up
/// file is removed again so a half-created pair is not left behind.
pub fn create_migration(dir: &Path, name: &UnitName, version: Version) -> CoreResult<CreatedMigration> {
    ensure_dir(dir)?;
    let up_path = dir.join(format!("{version}_{name}.up.sql"));
    let down_path = dir.join(format!("{version}_{name}.down.sql"));
    if down_path.exists() {
        return Err(CoreError::FileExists {
            path: down_path.display().to_string(),
        });
    }

    write_new(&up_path, &format!("-- up migration for {name}\n\n"))?;
    if let Err(e) = write_new(&down_path, &format!("-- down migration for {name}\n\n")) {
        let _ = std::fs::remove_file(&up_path);
        return Err(e);
    }

    Ok(CreatedMigration {
        version,
        up_path,
        down_path,
    })
}

/// Write an empty seed file `<name>.sql` under `dir`.
pub fn create_seed(dir: &Path, name: &UnitName) -> CoreResult<PathBuf> {
    ensure_dir(dir)?;
    let path = dir.join(format!("{name}.sql"));
    write_new(&path, &format!("-- seed for {name}\n\n"))?;
    Ok(path)
}

fn write_new(path: &Path, content: &str) -> CoreResult<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|source| {
            if source.kind() == std::io::ErrorKind::AlreadyExists {
                CoreError::FileExists {
                    path: path.display().to_string(),
                }
            } else {
                CoreError::IoWithPath {
                    path: path.display().to_string(),
                    source,
                }
            }
        })?;
    file.write_all(content.as_bytes())
        .map_err(|source| CoreError::IoWithPath {
            path: path.display().to_string(),
            source,
        })
}

#[cfg(test)]
#[path = "scaffold_test.rs"]
mod tests;
