//! Unit discovery: scan directories for migration pairs and seed files.
//!
//! Discovery is a pure scan. Creating missing directories is the caller's job
//! (see [`crate::scaffold::ensure_dir`]).

use crate::error::{CoreError, CoreResult};
use crate::naming::{Version, VERSION_LEN};
use crate::unit::{Direction, MigrationUnit, SeedUnit};
use std::collections::BTreeMap;
use std::fs::DirEntry;
use std::path::{Path, PathBuf};

/// Separator between the version token and the rest of a migration file name.
pub const VERSION_SEPARATOR: char = '_';

/// Split a migration file name into version, name, and direction.
///
/// Returns `None` for names quill does not treat as migrations: no `.sql`
/// extension, no version separator, or no `.up.sql` / `.down.sql` suffix.
pub fn parse_migration_file_name(file_name: &str) -> Option<(Version, String, Direction)> {
    if !file_name.ends_with(".sql") {
        return None;
    }
    let (version, rest) = file_name.split_once(VERSION_SEPARATOR)?;
    let version = Version::try_new(version)?;

    let direction = Direction::from_file_name(rest)?;
    let name = rest.strip_suffix(direction.suffix())?;
    Some((version, name.to_string(), direction))
}

/// Discover migration units under `dir`, sorted by version ascending.
///
/// Subdirectories are scanned too. Files sharing a version are merged into a
/// single unit; the first file seen supplies the unit's name.
pub fn discover_migrations(dir: &Path) -> CoreResult<Vec<MigrationUnit>> {
    let mut files = Vec::new();
    collect_files_recursive(dir, &mut files)?;

    let mut units: BTreeMap<Version, MigrationUnit> = BTreeMap::new();
    for path in files {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some((version, name, direction)) = parse_migration_file_name(file_name) else {
            if Direction::from_file_name(file_name).is_some() {
                log::warn!(
                    "Skipping {}: migration files must start with a {}-digit version and '_'",
                    path.display(),
                    VERSION_LEN
                );
            } else {
                log::debug!("Ignoring non-migration file {}", path.display());
            }
            continue;
        };

        let unit = units
            .entry(version.clone())
            .or_insert_with(|| MigrationUnit::new(version, name));
        if let Some(existing) = unit.script(direction) {
            log::warn!(
                "Duplicate {} script for version {}: keeping {}, ignoring {}",
                direction,
                unit.version,
                existing.display(),
                path.display()
            );
            continue;
        }
        unit.set_script(direction, path);
    }

    Ok(units.into_values().collect())
}

/// Discover seed files directly under `dir`, sorted by file name.
pub fn discover_seeds(dir: &Path) -> CoreResult<Vec<SeedUnit>> {
    let mut seeds = Vec::new();
    for entry in sorted_entries(dir)? {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if file_name.ends_with(".sql") {
            seeds.push(SeedUnit {
                file_name: file_name.to_string(),
                script: path.clone(),
            });
        }
    }
    seeds.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(seeds)
}

/// Recursively collect files in a directory, in sorted order.
///
/// Symlinked directories are not followed.
fn collect_files_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> CoreResult<()> {
    for entry in sorted_entries(dir)? {
        let path = entry.path();
        let file_type = entry.file_type().map_err(|source| CoreError::ReadDir {
            path: path.display().to_string(),
            source,
        })?;
        if file_type.is_dir() {
            collect_files_recursive(&path, files)?;
        } else if file_type.is_symlink() && path.is_dir() {
            log::debug!("Not following symlinked directory {}", path.display());
        } else {
            files.push(path);
        }
    }
    Ok(())
}

fn sorted_entries(dir: &Path) -> CoreResult<Vec<DirEntry>> {
    let read_err = |source| CoreError::ReadDir {
        path: dir.display().to_string(),
        source,
    };
    let mut entries = std::fs::read_dir(dir)
        .map_err(read_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_err)?;
    entries.sort_by_key(DirEntry::path);
    Ok(entries)
}

#[cfg(test)]
#[path = "discovery_test.rs"]
mod tests;
