//! Tests for database initialization and graceful degradation
//!
//! Covers automatic schema creation on first run, idempotent reopening, and
//! default setting initialization.

use griot_common::db::init::init_database;
use tempfile::TempDir;

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("griot.db");

    let result = init_database(&db_path).await;

    assert!(
        result.is_ok(),
        "Database initialization failed: {:?}",
        result.err()
    );
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_database_opens_existing() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("griot.db");

    let pool1 = init_database(&db_path).await;
    assert!(pool1.is_ok());

    // Second open of the same file must succeed without clobbering anything
    let pool2 = init_database(&db_path).await;
    assert!(
        pool2.is_ok(),
        "Failed to open existing database: {:?}",
        pool2.err()
    );
}

#[tokio::test]
async fn test_all_tables_created() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("griot.db");
    let pool = init_database(&db_path).await.unwrap();

    for table in [
        "contributors",
        "content",
        "stories",
        "proverbs",
        "artworks",
        "music_tracks",
        "reports",
        "settings",
        "schema_version",
    ] {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?)",
        )
        .bind(table)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert!(exists, "table '{}' was not created", table);
    }
}

#[tokio::test]
async fn test_default_settings_initialized() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("griot.db");
    let pool = init_database(&db_path).await.unwrap();

    let default_limit: Option<String> =
        sqlx::query_scalar("SELECT value FROM settings WHERE key = 'list_default_limit'")
            .fetch_optional(&pool)
            .await
            .unwrap();
    assert_eq!(default_limit.as_deref(), Some("20"));

    let max_limit: Option<String> =
        sqlx::query_scalar("SELECT value FROM settings WHERE key = 'list_max_limit'")
            .fetch_optional(&pool)
            .await
            .unwrap();
    assert_eq!(max_limit.as_deref(), Some("100"));

    let busy_timeout: Option<String> =
        sqlx::query_scalar("SELECT value FROM settings WHERE key = 'db_busy_timeout_ms'")
            .fetch_optional(&pool)
            .await
            .unwrap();
    assert_eq!(busy_timeout.as_deref(), Some("5000"));
}

#[tokio::test]
async fn test_null_setting_reset_to_default() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("griot.db");

    let pool = init_database(&db_path).await.unwrap();
    sqlx::query("UPDATE settings SET value = NULL WHERE key = 'list_default_limit'")
        .execute(&pool)
        .await
        .unwrap();
    drop(pool);

    // Reopen: NULL value must be reset to the default
    let pool = init_database(&db_path).await.unwrap();
    let value: Option<String> =
        sqlx::query_scalar("SELECT value FROM settings WHERE key = 'list_default_limit'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(value.as_deref(), Some("20"));
}

#[tokio::test]
async fn test_schema_version_recorded() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("griot.db");
    let pool = init_database(&db_path).await.unwrap();

    let version: Option<i32> =
        sqlx::query_scalar("SELECT version FROM schema_version ORDER BY version DESC LIMIT 1")
            .fetch_optional(&pool)
            .await
            .unwrap();

    assert!(version.unwrap_or(0) >= 2, "migrations were not recorded");
}
