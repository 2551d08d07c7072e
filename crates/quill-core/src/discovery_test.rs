use super::*;
use crate::error::ErrorKind;
use std::fs;
use tempfile::TempDir;

fn touch(dir: &Path, name: &str) {
    fs::write(dir.join(name), "-- sql\n").unwrap();
}

#[test]
fn test_parse_up_file_name() {
    let (version, name, direction) =
        parse_migration_file_name("20240101120000_create_users.up.sql").unwrap();
    assert_eq!(version, "20240101120000");
    assert_eq!(name, "create_users");
    assert_eq!(direction, Direction::Up);
}

#[test]
fn test_parse_down_file_name() {
    let (_, name, direction) =
        parse_migration_file_name("20240101120000_create_users.down.sql").unwrap();
    assert_eq!(name, "create_users");
    assert_eq!(direction, Direction::Down);
}

#[test]
fn test_parse_ignores_unrecognized_names() {
    assert!(parse_migration_file_name("README.md").is_none());
    assert!(parse_migration_file_name("nounderscore.up.sql").is_none());
    assert!(parse_migration_file_name("20240101_create_users.sql").is_none());
    assert!(parse_migration_file_name("20240101_create_users.up.txt").is_none());
}

#[test]
fn test_discover_pairs_sorted_by_version() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "20240301000000_add_orders.up.sql");
    touch(dir.path(), "20240301000000_add_orders.down.sql");
    touch(dir.path(), "20240101000000_create_users.up.sql");
    touch(dir.path(), "20240101000000_create_users.down.sql");
    touch(dir.path(), "notes.txt");

    let units = discover_migrations(dir.path()).unwrap();
    assert_eq!(units.len(), 2);
    assert_eq!(units[0].version, "20240101000000");
    assert_eq!(units[0].name, "create_users");
    assert!(units[0].is_complete());
    assert_eq!(units[1].version, "20240301000000");
    assert_eq!(units[1].name, "add_orders");
    assert_eq!(
        units[1].up_script.as_deref(),
        Some(dir.path().join("20240301000000_add_orders.up.sql").as_path())
    );
}

#[test]
fn test_discover_keeps_partial_units() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "20240101000000_only_up.up.sql");
    touch(dir.path(), "20240202000000_only_down.down.sql");

    let units = discover_migrations(dir.path()).unwrap();
    assert_eq!(units.len(), 2);
    assert!(units[0].up_script.is_some());
    assert!(units[0].down_script.is_none());
    assert!(units[1].up_script.is_none());
    assert!(units[1].down_script.is_some());
    assert!(!units[0].is_complete());
}

#[test]
fn test_discover_recurses_into_subdirectories() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("2024").join("q1");
    fs::create_dir_all(&nested).unwrap();
    touch(&nested, "20240115000000_nested.up.sql");
    touch(&nested, "20240115000000_nested.down.sql");
    touch(dir.path(), "20231231000000_top.up.sql");

    let units = discover_migrations(dir.path()).unwrap();
    let versions: Vec<&str> = units.iter().map(|u| u.version.as_str()).collect();
    assert_eq!(versions, vec!["20231231000000", "20240115000000"]);
    assert!(units[1].is_complete());
}

#[test]
fn test_discover_empty_directory() {
    let dir = TempDir::new().unwrap();
    assert!(discover_migrations(dir.path()).unwrap().is_empty());
    assert!(discover_seeds(dir.path()).unwrap().is_empty());
}

#[test]
fn test_discover_missing_directory_is_internal_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("does_not_exist");
    let err = discover_migrations(&missing).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Internal);
    assert!(matches!(err, CoreError::ReadDir { .. }));
}

#[test]
fn test_discover_seeds_sorted_and_top_level_only() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "b_products.sql");
    touch(dir.path(), "a_users.sql");
    touch(dir.path(), "ignore.csv");
    let nested = dir.path().join("nested");
    fs::create_dir(&nested).unwrap();
    touch(&nested, "c_hidden.sql");

    let seeds = discover_seeds(dir.path()).unwrap();
    let names: Vec<&str> = seeds.iter().map(|s| s.file_name.as_str()).collect();
    assert_eq!(names, vec!["a_users.sql", "b_products.sql"]);
    assert_eq!(seeds[0].script, dir.path().join("a_users.sql"));
}

#[test]
fn test_parse_rejects_non_timestamp_versions() {
    assert!(parse_migration_file_name("001_create_users.up.sql").is_none());
    assert!(parse_migration_file_name("v20240101000000_x.up.sql").is_none());
    assert!(parse_migration_file_name("2024010100000_short.down.sql").is_none());
}

#[test]
fn test_discover_skips_malformed_versions() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "001_legacy.up.sql");
    touch(dir.path(), "20240101000000_good.up.sql");

    let units = discover_migrations(dir.path()).unwrap();
    assert_eq!(units.len(), 1);
    assert_eq!(units[0].version, "20240101000000");
}

#[cfg(unix)]
#[test]
fn test_discover_does_not_follow_symlinked_directories() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("nested");
    fs::create_dir(&nested).unwrap();
    touch(&nested, "20240101000000_inner.up.sql");
    // A link back to the root would recurse forever if followed.
    std::os::unix::fs::symlink(dir.path(), nested.join("loop")).unwrap();

    let units = discover_migrations(dir.path()).unwrap();
    assert_eq!(units.len(), 1);
    assert_eq!(units[0].name, "inner");
}

#[cfg(unix)]
#[test]
fn test_discover_reads_symlinked_files() {
    let dir = TempDir::new().unwrap();
    let shared = TempDir::new().unwrap();
    touch(shared.path(), "shared.sql");
    std::os::unix::fs::symlink(
        shared.path().join("shared.sql"),
        dir.path().join("20240101000000_shared.up.sql"),
    )
    .unwrap();

    let units = discover_migrations(dir.path()).unwrap();
    assert_eq!(units.len(), 1);
    assert!(units[0].up_script.is_some());
}
