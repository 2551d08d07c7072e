//! End-to-end runs against a DuckDB file, reopened between steps the way
//! separate CLI invocations would.

use quill_db::{connect, query_many, Record};
use quill_migrate::{new_migration, new_seed, MigrationRunner, SeedRunner, UnitState};
use std::path::Path;
use tempfile::TempDir;

#[derive(Debug, Default, Record)]
struct Widget {
    id: i64,
    label: String,
}

fn fill(path: &Path, sql: &str) {
    std::fs::write(path, sql).unwrap();
}

#[tokio::test]
async fn test_full_lifecycle_across_connections() {
    let dir = TempDir::new().unwrap();
    let migrations = dir.path().join("db").join("migrations");
    let seeds = dir.path().join("db").join("seeds");
    let url = format!("duckdb://{}", dir.path().join("app.duckdb").display());

    {
        let db = connect(&url).await.unwrap();
        MigrationRunner::new(db.as_ref(), &migrations).init().await.unwrap();
        SeedRunner::new(db.as_ref(), &seeds).init().await.unwrap();
    }

    let created = new_migration(&migrations, "Create Widgets").unwrap();
    fill(
        &created.up_path,
        "CREATE TABLE widgets (id BIGINT PRIMARY KEY, label TEXT NOT NULL);",
    );
    fill(&created.down_path, "DROP TABLE widgets;");
    let seed = new_seed(&seeds, "widgets").unwrap();
    fill(&seed, "INSERT INTO widgets VALUES (1, 'sprocket'), (2, 'gear');");

    {
        let db = connect(&url).await.unwrap();
        let report = MigrationRunner::new(db.as_ref(), &migrations).up().await.unwrap();
        assert_eq!(report.units, vec![created.version.to_string()]);
        SeedRunner::new(db.as_ref(), &seeds).apply().await.unwrap();
    }

    {
        let db = connect(&url).await.unwrap();
        let widgets: Vec<Widget> = query_many(db.as_ref(), "SELECT * FROM widgets ORDER BY id", &[])
            .await
            .unwrap();
        let labels: Vec<&str> = widgets.iter().map(|w| w.label.as_str()).collect();
        assert_eq!(labels, vec!["sprocket", "gear"]);
        assert_eq!(widgets[1].id, 2);

        let seed_status = SeedRunner::new(db.as_ref(), &seeds).status().await.unwrap();
        assert_eq!(seed_status[0].state, UnitState::Applied);

        let runner = MigrationRunner::new(db.as_ref(), &migrations);
        assert!(runner.up().await.unwrap().is_empty());
        runner.down(1).await.unwrap();
        assert!(!db.relation_exists("widgets").await.unwrap());
        let status = runner.status().await.unwrap();
        assert_eq!(status[0].state, UnitState::Pending);
        assert_eq!(status[0].name, "create_widgets");
    }
}

#[tokio::test]
async fn test_status_on_fresh_database_without_init() {
    let dir = TempDir::new().unwrap();
    let migrations = dir.path().join("migrations");
    new_migration(&migrations, "first").unwrap();

    let db = connect("duckdb://:memory:").await.unwrap();
    let status = MigrationRunner::new(db.as_ref(), &migrations)
        .status()
        .await
        .unwrap();
    assert_eq!(status.len(), 1);
    assert_eq!(status[0].state, UnitState::Pending);
}
