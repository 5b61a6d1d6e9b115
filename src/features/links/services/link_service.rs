use chrono::SecondsFormat;
use sqlx::SqlitePool;

use crate::core::error::{AppError, Result};
use crate::features::links::models::{normalize_url, CreateLink, Link};

/// Service for link storage
pub struct LinkService {
    pool: SqlitePool,
}

impl LinkService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All links of a category, most recently inserted first
    pub async fn list_by_category(&self, category: &str) -> Result<Vec<Link>> {
        sqlx::query_as::<_, Link>(
            r#"
            SELECT id, category, name, url, notes, added, safe
            FROM link
            WHERE category = ?
            ORDER BY id DESC
            "#,
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list links for category {}: {:?}", category, e);
            AppError::Database(e)
        })
    }

    /// Whether the category already holds this URL, ignoring ASCII case and
    /// trailing slashes
    pub async fn exists(&self, category: &str, url: &str) -> Result<bool> {
        let found = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT 1
            FROM link
            WHERE category = ? AND rtrim(lower(url), '/') = ?
            LIMIT 1
            "#,
        )
        .bind(category)
        .bind(normalize_url(url))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check link {} in {}: {:?}", url, category, e);
            AppError::Database(e)
        })?;

        Ok(found.is_some())
    }

    pub async fn create(&self, link: CreateLink) -> Result<Link> {
        let added = link.added.to_rfc3339_opts(SecondsFormat::Secs, true);

        let created = sqlx::query_as::<_, Link>(
            r#"
            INSERT INTO link (category, name, url, notes, added)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, category, name, url, notes, added, safe
            "#,
        )
        .bind(&link.category)
        .bind(&link.name)
        .bind(&link.url)
        .bind(&link.notes)
        .bind(&added)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert link into {}: {:?}", link.category, e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Link created: id={}, category={}, url={}, added={}",
            created.id,
            created.category,
            created.url,
            added
        );

        Ok(created)
    }
}
