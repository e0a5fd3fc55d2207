//! Content item persistence and listing queries

use chrono::{DateTime, NaiveDate, Utc};
use heirloom_common::Result;
use serde::Serialize;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::models::ContentRecord;
use crate::services::category_normalizer;

/// Persist a content record; returns the record identifier
///
/// The category CHECK constraint fires here if a non-canonical value made
/// it through normalization.
pub async fn insert_content_item(pool: &SqlitePool, record: &ContentRecord) -> Result<Uuid> {
    sqlx::query(
        r#"
        INSERT INTO content_items (
            guid, category, title, description, body_text,
            occurred_on, date_is_approximate,
            contributor_name, contributor_email, contributor_phone,
            location, people_mentioned,
            asset_kind, asset_url, asset_destination, asset_key, duration_seconds,
            is_public, is_sensitive, source, submitted_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(record.guid.to_string())
    .bind(&record.category)
    .bind(&record.title)
    .bind(&record.description)
    .bind(&record.body_text)
    .bind(record.occurred_on.map(|d| d.to_string()))
    .bind(record.date_is_approximate as i64)
    .bind(&record.contributor.name)
    .bind(&record.contributor.email)
    .bind(&record.contributor.phone)
    .bind(&record.location)
    .bind(&record.people_mentioned)
    .bind(record.asset.kind_str())
    .bind(record.asset.url())
    .bind(record.asset.destination())
    .bind(record.asset.key())
    .bind(record.asset.duration_seconds().map(|d| d as i64))
    .bind(record.visibility.is_public as i64)
    .bind(record.visibility.is_sensitive as i64)
    .bind(record.provenance.channel.as_str())
    .bind(record.provenance.submitted_at.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(record.guid)
}

/// Listing row for browse and timeline views
#[derive(Debug, Clone, Serialize)]
pub struct ContentItemSummary {
    pub id: Uuid,
    pub category: String,
    pub title: String,
    pub description: Option<String>,
    pub body_text: Option<String>,
    pub occurred_on: Option<NaiveDate>,
    pub date_is_approximate: bool,
    pub contributor_name: Option<String>,
    pub asset_kind: String,
    pub asset_url: Option<String>,
    pub duration_seconds: Option<i64>,
    pub submitted_at: DateTime<Utc>,
}

/// List public records, optionally filtered by category
///
/// The category filter accepts any alias the UI emits; it is normalized
/// before the query. Ordered by occurred_on, newest first by default.
pub async fn list_public(
    pool: &SqlitePool,
    category: Option<&str>,
    ascending: bool,
) -> Result<Vec<ContentItemSummary>> {
    let order = if ascending { "ASC" } else { "DESC" };

    let rows = match category {
        Some(raw) => {
            let canonical = category_normalizer::normalize(raw);
            sqlx::query(&format!(
                r#"
                SELECT guid, category, title, description, body_text,
                       occurred_on, date_is_approximate, contributor_name,
                       asset_kind, asset_url, duration_seconds, submitted_at
                FROM content_items
                WHERE is_public = 1 AND category = ?
                ORDER BY occurred_on {order}
                "#
            ))
            .bind(canonical)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query(&format!(
                r#"
                SELECT guid, category, title, description, body_text,
                       occurred_on, date_is_approximate, contributor_name,
                       asset_kind, asset_url, duration_seconds, submitted_at
                FROM content_items
                WHERE is_public = 1
                ORDER BY occurred_on {order}
                "#
            ))
            .fetch_all(pool)
            .await?
        }
    };

    rows.into_iter().map(summary_from_row).collect()
}

/// Public, dated records for the timeline, oldest first
pub async fn list_timeline(pool: &SqlitePool) -> Result<Vec<ContentItemSummary>> {
    let rows = sqlx::query(
        r#"
        SELECT guid, category, title, description, body_text,
               occurred_on, date_is_approximate, contributor_name,
               asset_kind, asset_url, duration_seconds, submitted_at
        FROM content_items
        WHERE is_public = 1 AND occurred_on IS NOT NULL
        ORDER BY occurred_on ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(summary_from_row).collect()
}

/// Count all stored records
pub async fn count_items(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM content_items")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

fn summary_from_row(row: sqlx::sqlite::SqliteRow) -> Result<ContentItemSummary> {
    let guid_str: String = row.get("guid");
    let id = Uuid::parse_str(&guid_str)
        .map_err(|e| heirloom_common::Error::Internal(format!("Bad guid in database: {e}")))?;

    let occurred_on = row
        .get::<Option<String>, _>("occurred_on")
        .map(|s| s.parse::<NaiveDate>())
        .transpose()?;

    let submitted_str: String = row.get("submitted_at");
    let submitted_at = DateTime::parse_from_rfc3339(&submitted_str)?.with_timezone(&Utc);

    Ok(ContentItemSummary {
        id,
        category: row.get("category"),
        title: row.get("title"),
        description: row.get("description"),
        body_text: row.get("body_text"),
        occurred_on,
        date_is_approximate: row.get::<i64, _>("date_is_approximate") != 0,
        contributor_name: row.get("contributor_name"),
        asset_kind: row.get("asset_kind"),
        asset_url: row.get("asset_url"),
        duration_seconds: row.get("duration_seconds"),
        submitted_at,
    })
}
