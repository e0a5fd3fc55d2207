//! Database initialization
//!
//! Creates the database on first run and brings up the shared schema.
//! All table creation is idempotent (`CREATE TABLE IF NOT EXISTS`) so
//! startup is safe against both fresh and existing databases.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

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
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;

    // WAL mode allows concurrent readers while one submission writes
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;

    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

    create_content_items_table(&pool).await?;

    Ok(pool)
}

/// Create the content_items table
///
/// The CHECK constraint on `category` enforces the canonical enumeration at
/// the storage layer: an alias that slipped past normalization is rejected
/// here with a constraint violation instead of being stored verbatim.
pub async fn create_content_items_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS content_items (
            guid TEXT PRIMARY KEY,
            category TEXT NOT NULL CHECK (category IN (
                'letter', 'diary_entry', 'photo', 'audio_recording', 'video',
                'news_clipping', 'anecdote', 'interview', 'document', 'transcript'
            )),
            title TEXT NOT NULL,
            description TEXT,
            body_text TEXT,
            occurred_on TEXT,
            date_is_approximate INTEGER NOT NULL DEFAULT 0,
            contributor_name TEXT,
            contributor_email TEXT,
            contributor_phone TEXT,
            location TEXT,
            people_mentioned TEXT,
            asset_kind TEXT NOT NULL DEFAULT 'none' CHECK (asset_kind IN (
                'none', 'image', 'audio', 'video', 'document'
            )),
            asset_url TEXT,
            asset_destination TEXT,
            asset_key TEXT,
            duration_seconds INTEGER,
            is_public INTEGER NOT NULL DEFAULT 1,
            is_sensitive INTEGER NOT NULL DEFAULT 0,
            source TEXT NOT NULL,
            submitted_at TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_content_items_category ON content_items (category)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_content_items_occurred_on ON content_items (occurred_on)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn schema_init_is_idempotent() {
        let pool = SqlitePool::connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");

        create_content_items_table(&pool).await.unwrap();
        create_content_items_table(&pool).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM content_items")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn category_check_rejects_unknown_values() {
        let pool = SqlitePool::connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");
        create_content_items_table(&pool).await.unwrap();

        let result = sqlx::query(
            r#"
            INSERT INTO content_items (guid, category, title, source, submitted_at)
            VALUES (?, 'recordings', 'Alias that skipped normalization', 'web_form', ?)
            "#,
        )
        .bind(uuid::Uuid::new_v4().to_string())
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&pool)
        .await;

        assert!(result.is_err(), "CHECK constraint should reject a non-canonical category");
    }

    #[tokio::test]
    async fn init_database_creates_file_and_schema() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("archive").join("heirloom.db");

        let pool = init_database(&db_path).await.expect("init_database failed");
        assert!(db_path.exists());

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM content_items")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
