//! Database initialization tests
//!
//! - Database file and parent directory are created on first run
//! - Re-opening an existing database is idempotent
//! - Biography rows are seeded once
//! - Foreign keys are enforced on every pooled connection

use arman_common::config::DatabaseConfig;
use arman_common::db::init_database;
use tempfile::TempDir;

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("nested").join("arman.db");

    let result = init_database(&db_path, &DatabaseConfig::default()).await;

    assert!(result.is_ok(), "Database initialization failed: {:?}", result.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_database_opens_existing() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("arman.db");

    let pool1 = init_database(&db_path, &DatabaseConfig::default()).await.unwrap();
    pool1.close().await;

    let pool2 = init_database(&db_path, &DatabaseConfig::default()).await;
    assert!(pool2.is_ok(), "Failed to open existing database: {:?}", pool2.err());

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM biographies")
        .fetch_one(&pool2.unwrap())
        .await
        .unwrap();
    assert_eq!(count, 2, "biography variants seeded more than once");
}

#[tokio::test]
async fn test_all_tables_created() {
    let dir = TempDir::new().unwrap();
    let pool = init_database(&dir.path().join("arman.db"), &DatabaseConfig::default())
        .await
        .unwrap();

    for table in [
        "composers",
        "pieces",
        "programmes",
        "programme_pieces",
        "venues",
        "events",
        "biographies",
    ] {
        let exists: Option<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?",
        )
        .bind(table)
        .fetch_optional(&pool)
        .await
        .unwrap();

        assert!(exists.is_some(), "table {} missing", table);
    }
}

#[tokio::test]
async fn test_foreign_keys_enforced() {
    let dir = TempDir::new().unwrap();
    let pool = init_database(&dir.path().join("arman.db"), &DatabaseConfig::default())
        .await
        .unwrap();

    let result = sqlx::query("INSERT INTO pieces (title, composer_id) VALUES ('Orphan', 999)")
        .execute(&pool)
        .await;

    assert!(result.is_err(), "piece without composer was accepted");
}

#[tokio::test]
async fn test_unknown_event_status_rejected() {
    let dir = TempDir::new().unwrap();
    let pool = init_database(&dir.path().join("arman.db"), &DatabaseConfig::default())
        .await
        .unwrap();

    let result = sqlx::query(
        "INSERT INTO events (title, status, created_at, updated_at) VALUES ('x', 'cancelled', '', '')",
    )
    .execute(&pool)
    .await;

    assert!(result.is_err());
}
