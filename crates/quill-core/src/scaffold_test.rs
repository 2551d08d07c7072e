use super::*;
use crate::discovery::{discover_migrations, discover_seeds};
use crate::error::ErrorKind;
use crate::naming::sanitize_name;
use chrono::{TimeZone, Utc};
use tempfile::TempDir;

fn version() -> Version {
    Version::from_timestamp(Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap())
}

#[test]
fn test_ensure_dir_creates_nested() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("db").join("migrations");
    ensure_dir(&target).unwrap();
    assert!(target.is_dir());
    // idempotent
    ensure_dir(&target).unwrap();
}

#[test]
fn test_create_migration_writes_pair() {
    let dir = TempDir::new().unwrap();
    let name = sanitize_name("migration", "Create Users Table!").unwrap();
    let created = create_migration(dir.path(), &name, version()).unwrap();

    assert_eq!(
        created.up_path,
        dir.path().join("20240501083000_create_users_table.up.sql")
    );
    assert_eq!(
        std::fs::read_to_string(&created.up_path).unwrap(),
        "-- up migration for create_users_table\n\n"
    );
    assert_eq!(
        std::fs::read_to_string(&created.down_path).unwrap(),
        "-- down migration for create_users_table\n\n"
    );

    let units = discover_migrations(dir.path()).unwrap();
    assert_eq!(units.len(), 1);
    assert_eq!(units[0].version, created.version);
    assert!(units[0].is_complete());
}

#[test]
fn test_create_migration_creates_missing_dir() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("migrations");
    let name = UnitName::try_new("init").unwrap();
    create_migration(&target, &name, version()).unwrap();
    assert!(target.is_dir());
}

#[test]
fn test_create_migration_refuses_overwrite() {
    let dir = TempDir::new().unwrap();
    let name = UnitName::try_new("create_users").unwrap();
    create_migration(dir.path(), &name, version()).unwrap();
    std::fs::write(
        dir.path().join("20240501083000_create_users.up.sql"),
        "CREATE TABLE users (id INT);",
    )
    .unwrap();

    let err = create_migration(dir.path(), &name, version()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(
        std::fs::read_to_string(dir.path().join("20240501083000_create_users.up.sql")).unwrap(),
        "CREATE TABLE users (id INT);"
    );
}

#[test]
fn test_create_seed_writes_file() {
    let dir = TempDir::new().unwrap();
    let name = sanitize_name("seed", "Seed Users").unwrap();
    let path = create_seed(dir.path(), &name).unwrap();
    assert_eq!(path, dir.path().join("seed_users.sql"));
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "-- seed for seed_users\n\n"
    );
    let seeds = discover_seeds(dir.path()).unwrap();
    assert_eq!(seeds[0].file_name, "seed_users.sql");
}

#[test]
fn test_create_seed_refuses_overwrite() {
    let dir = TempDir::new().unwrap();
    let name = UnitName::try_new("seed_users").unwrap();
    create_seed(dir.path(), &name).unwrap();
    let err = create_seed(dir.path(), &name).unwrap_err();
    assert!(matches!(err, CoreError::FileExists { .. }));
}
