use super::*;
use quill_db::DuckDbBackend;

#[tokio::test]
async fn test_list_without_table_is_empty() {
    let db = DuckDbBackend::in_memory().unwrap();
    let migrations = MigrationStore::new(&db);
    let seeds = SeedStore::new(&db);

    assert!(!migrations.table_exists().await.unwrap());
    assert!(migrations.list().await.unwrap().is_empty());
    assert!(seeds.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_ensure_table_is_idempotent() {
    let db = DuckDbBackend::in_memory().unwrap();
    let store = MigrationStore::new(&db);
    store.ensure_table().await.unwrap();
    store.ensure_table().await.unwrap();
    assert!(store.table_exists().await.unwrap());
}

#[tokio::test]
async fn test_insert_list_delete_migrations() {
    let db = DuckDbBackend::in_memory().unwrap();
    let store = MigrationStore::new(&db);
    store.ensure_table().await.unwrap();

    store.insert("20240102000000", "second").await.unwrap();
    store.insert("20240101000000", "first").await.unwrap();

    let applied = store.list().await.unwrap();
    let versions: Vec<&str> = applied.iter().map(|m| m.version.as_str()).collect();
    assert_eq!(versions, vec!["20240101000000", "20240102000000"]);
    assert_eq!(applied[0].name, "first");
    assert!(applied[0].applied_at.is_some());

    store.delete("20240101000000").await.unwrap();
    let applied = store.list().await.unwrap();
    assert_eq!(applied.len(), 1);
    assert_eq!(applied[0].version, "20240102000000");
}

#[tokio::test]
async fn test_duplicate_version_rejected() {
    let db = DuckDbBackend::in_memory().unwrap();
    let store = MigrationStore::new(&db);
    store.ensure_table().await.unwrap();
    store.insert("20240101000000", "first").await.unwrap();
    assert!(store.insert("20240101000000", "again").await.is_err());
}

#[tokio::test]
async fn test_seed_rows_map_name_column() {
    let db = DuckDbBackend::in_memory().unwrap();
    let store = SeedStore::new(&db);
    store.ensure_table().await.unwrap();
    store.insert("002_orders.sql").await.unwrap();
    store.insert("001_users.sql").await.unwrap();

    let applied = store.list().await.unwrap();
    let names: Vec<&str> = applied.iter().map(|s| s.file_name.as_str()).collect();
    assert_eq!(names, vec!["001_users.sql", "002_orders.sql"]);
    assert!(applied.iter().all(|s| s.applied_at.is_some()));
}

#[tokio::test]
async fn test_other_failures_propagate() {
    let db = DuckDbBackend::in_memory().unwrap();
    // A view with the tracking table's name but the wrong shape.
    db.execute_batch("CREATE VIEW schema_migrations AS SELECT 1 AS id")
        .await
        .unwrap();
    let err = MigrationStore::new(&db).list().await.unwrap_err();
    assert!(!err.is_table_not_found(), "{err}");
}
