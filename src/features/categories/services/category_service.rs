use sqlx::SqlitePool;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::Category;

/// Service for category lookups
pub struct CategoryService {
    pool: SqlitePool,
}

impl CategoryService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get category by slug
    ///
    /// A missing category is a normal outcome (`Ok(None)`), not an error.
    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, url_stub AS slug, passcode, page_top_blurb
            FROM category
            WHERE url_stub = ?
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to query category with slug {}: {:?}", slug, e);
            AppError::Database(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{create_test_pool, insert_category};

    #[tokio::test]
    async fn test_find_by_slug_returns_category() {
        let pool = create_test_pool().await;
        insert_category(&pool, "hawaii", "Hawaii", "aloha", Some("<b>surf</b>")).await;

        let service = CategoryService::new(pool);
        let category = service.find_by_slug("hawaii").await.unwrap().unwrap();

        assert_eq!(category.name, "Hawaii");
        assert_eq!(category.slug, "hawaii");
        assert_eq!(category.passcode, "aloha");
        assert_eq!(category.page_top_blurb.as_deref(), Some("<b>surf</b>"));
    }

    #[tokio::test]
    async fn test_find_by_slug_missing_is_none() {
        let pool = create_test_pool().await;
        insert_category(&pool, "hawaii", "Hawaii", "aloha", None).await;

        let service = CategoryService::new(pool);
        assert!(service.find_by_slug("alaska").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_by_slug_is_exact_match() {
        let pool = create_test_pool().await;
        insert_category(&pool, "hawaii", "Hawaii", "aloha", None).await;

        let service = CategoryService::new(pool);
        assert!(service.find_by_slug("Hawaii").await.unwrap().is_none());
        assert!(service.find_by_slug("hawaii ").await.unwrap().is_none());
    }
}
