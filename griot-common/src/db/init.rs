//! Database initialization
//!
//! Creates the archive schema on first run and reopens it idempotently
//! afterwards. Every table uses `CREATE TABLE IF NOT EXISTS`; versioned
//! migrations in [`crate::db::migrations`] handle changes to existing
//! databases.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Use sqlite options to create database if it doesn't exist
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(20)
        .min_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // Enable foreign keys; the one-to-one base/extension relationship and
    // report references depend on them
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;

    // WAL allows concurrent readers with one writer
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;

    // Default busy timeout; re-applied from settings after they exist
    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

    // Schema creation (idempotent - safe to call multiple times)
    create_schema_version_table(&pool).await?;
    create_contributors_table(&pool).await?;
    create_content_table(&pool).await?;
    create_stories_table(&pool).await?;
    create_proverbs_table(&pool).await?;
    create_artworks_table(&pool).await?;
    create_music_tracks_table(&pool).await?;
    create_reports_table(&pool).await?;
    create_settings_table(&pool).await?;

    // Migrations for databases created by older builds
    crate::db::migrations::run_migrations(&pool).await?;

    // Default settings
    init_default_settings(&pool).await?;

    // Apply configurable busy timeout from settings
    let timeout_ms: i64 = sqlx::query_scalar(
        "SELECT CAST(value AS INTEGER) FROM settings WHERE key = 'db_busy_timeout_ms'",
    )
    .fetch_optional(&pool)
    .await?
    .unwrap_or(5000);

    let pragma_sql = format!("PRAGMA busy_timeout = {}", timeout_ms);
    sqlx::query(&pragma_sql).execute(&pool).await?;

    info!("Database busy timeout set to {} ms", timeout_ms);

    Ok(pool)
}

async fn create_schema_version_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the contributors table
pub async fn create_contributors_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS contributors (
            guid TEXT PRIMARY KEY,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            region TEXT NOT NULL,
            bio TEXT,
            role TEXT NOT NULL DEFAULT 'contributor' CHECK (role IN ('contributor', 'admin')),
            created_at INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_contributors_email ON contributors(email)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Create the base content table
///
/// One row per artifact regardless of kind. The `category` value names the
/// extension table that must hold exactly one row keyed by this guid.
/// `contributor_id` is a plain nullable reference (no FK): a contributor row
/// may vanish and readers degrade to `contributor: null` instead of failing.
pub async fn create_content_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS content (
            guid TEXT PRIMARY KEY,
            title TEXT NOT NULL CHECK (length(title) > 0),
            description TEXT NOT NULL CHECK (length(description) > 0),
            category TEXT NOT NULL CHECK (category IN ('stories', 'proverbs', 'art', 'music')),
            contributor_id TEXT,
            region TEXT NOT NULL CHECK (length(region) > 0),
            is_featured INTEGER NOT NULL DEFAULT 0,
            status TEXT NOT NULL DEFAULT 'pending' CHECK (status IN ('pending', 'approved', 'rejected', 'removed')),
            rejection_reason TEXT,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_content_category_status ON content(category, status, created_at)",
    )
    .execute(pool)
    .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_content_contributor ON content(contributor_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_content_status ON content(status)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_stories_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS stories (
            content_id TEXT PRIMARY KEY REFERENCES content(guid) ON DELETE CASCADE,
            body TEXT NOT NULL,
            read_time TEXT NOT NULL,
            moral_lesson TEXT NOT NULL,
            context TEXT NOT NULL,
            difficulty TEXT,
            cover_image TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_proverbs_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS proverbs (
            content_id TEXT PRIMARY KEY REFERENCES content(guid) ON DELETE CASCADE,
            body TEXT NOT NULL,
            english_translation TEXT NOT NULL,
            proverb_category TEXT,
            difficulty TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_artworks_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS artworks (
            content_id TEXT PRIMARY KEY REFERENCES content(guid) ON DELETE CASCADE,
            body TEXT NOT NULL,
            technique TEXT NOT NULL,
            medium TEXT NOT NULL,
            time_to_create TEXT,
            difficulty TEXT,
            booking_available INTEGER NOT NULL DEFAULT 0,
            booking_venue TEXT,
            booking_price REAL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_music_tracks_table(pool: &SqlitePool) -> Result<()> {
    // tags is a JSON array stored as TEXT
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS music_tracks (
            content_id TEXT PRIMARY KEY REFERENCES content(guid) ON DELETE CASCADE,
            body TEXT,
            genre TEXT NOT NULL,
            audio_url TEXT NOT NULL,
            tags TEXT,
            tempo TEXT,
            cover_image TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the reports table
pub async fn create_reports_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS reports (
            guid TEXT PRIMARY KEY,
            content_id TEXT NOT NULL REFERENCES content(guid) ON DELETE CASCADE,
            reporter_id TEXT NOT NULL,
            reason TEXT NOT NULL CHECK (length(reason) > 0),
            details TEXT,
            status TEXT NOT NULL DEFAULT 'pending' CHECK (status IN ('pending', 'resolved', 'dismissed')),
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_reports_status ON reports(status, created_at)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_reports_content ON reports(content_id)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Create the settings table
///
/// Stores service configuration key-value pairs.
pub async fn create_settings_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Initialize or update default settings
///
/// Ensures all required settings exist with default values, and resets NULL
/// values back to defaults.
async fn init_default_settings(pool: &SqlitePool) -> Result<()> {
    // Listing limits for public read endpoints
    ensure_setting(pool, "list_default_limit", "20").await?;
    ensure_setting(pool, "list_max_limit", "100").await?;

    // Database settings
    ensure_setting(pool, "db_busy_timeout_ms", "5000").await?;

    info!("Default settings initialized");
    Ok(())
}

/// Ensure a setting exists with the specified default value
///
/// If the setting doesn't exist, it will be created with the default.
/// If the setting exists but has a NULL value, it will be reset to the default.
pub async fn ensure_setting(pool: &SqlitePool, key: &str, default_value: &str) -> Result<()> {
    // Check if setting exists
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM settings WHERE key = ?)")
        .bind(key)
        .fetch_one(pool)
        .await?;

    if !exists {
        // Use INSERT OR IGNORE to handle concurrent initialization race
        // conditions; multiple workers may pass the exists check together
        sqlx::query("INSERT OR IGNORE INTO settings (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(default_value)
            .execute(pool)
            .await?;

        info!(
            "Initialized setting '{}' with default value: {}",
            key, default_value
        );
        return Ok(());
    }

    // Check if value is NULL
    let value: Option<String> = sqlx::query_scalar("SELECT value FROM settings WHERE key = ?")
        .bind(key)
        .fetch_one(pool)
        .await?;

    if value.is_none() {
        sqlx::query("UPDATE settings SET value = ? WHERE key = ?")
            .bind(default_value)
            .bind(key)
            .execute(pool)
            .await?;

        warn!(
            "Setting '{}' was NULL, reset to default: {}",
            key, default_value
        );
    }

    Ok(())
}
