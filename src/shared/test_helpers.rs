use async_trait::async_trait;
use reqwest::StatusCode;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use crate::core::database::run_migrations;
use crate::features::categories::{Category, CategoryService};
use crate::features::links::{LinkService, PageState, SubmissionService};
use crate::modules::safe_browsing::{
    SafeBrowsingError, ThreatEntry, ThreatMatch, UrlReputationChecker,
};
use crate::shared::templates::TemplateEngine;

/// Fresh migrated in-memory database. A single connection that never
/// expires, so the database lives as long as the pool.
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .unwrap();

    run_migrations(&pool).await.unwrap();
    pool
}

pub async fn insert_category(
    pool: &SqlitePool,
    slug: &str,
    name: &str,
    passcode: &str,
    page_top_blurb: Option<&str>,
) -> Category {
    sqlx::query_as::<_, Category>(
        r#"
        INSERT INTO category (name, url_stub, passcode, page_top_blurb)
        VALUES (?, ?, ?, ?)
        RETURNING id, name, url_stub AS slug, passcode, page_top_blurb
        "#,
    )
    .bind(name)
    .bind(slug)
    .bind(passcode)
    .bind(page_top_blurb)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub fn test_templates_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("web")
}

pub fn test_assets_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("assets")
}

pub fn test_templates() -> TemplateEngine {
    TemplateEngine::load(&test_templates_dir()).unwrap()
}

pub fn build_page_state(pool: SqlitePool, checker: Arc<dyn UrlReputationChecker>) -> PageState {
    let links = Arc::new(LinkService::new(pool.clone()));
    PageState {
        categories: Arc::new(CategoryService::new(pool)),
        submissions: Arc::new(SubmissionService::new(Arc::clone(&links), checker)),
        links,
        templates: Arc::new(test_templates()),
    }
}

/// Reputation checker that flags a fixed set of URLs and records lookups
#[derive(Default)]
pub struct ScriptedChecker {
    flagged: Vec<String>,
    lookups: Mutex<Vec<String>>,
}

impl ScriptedChecker {
    pub fn flagging(urls: &[&str]) -> Self {
        Self {
            flagged: urls.iter().map(|u| u.to_string()).collect(),
            lookups: Mutex::new(Vec::new()),
        }
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl UrlReputationChecker for ScriptedChecker {
    async fn lookup_urls(
        &self,
        urls: &[String],
    ) -> Result<Vec<Vec<ThreatMatch>>, SafeBrowsingError> {
        self.lookups.lock().unwrap().extend(urls.iter().cloned());

        Ok(urls
            .iter()
            .map(|url| {
                if self.flagged.contains(url) {
                    vec![ThreatMatch {
                        threat_type: "SOCIAL_ENGINEERING".to_string(),
                        platform_type: "ANY_PLATFORM".to_string(),
                        threat_entry_type: "URL".to_string(),
                        threat: ThreatEntry { url: url.clone() },
                    }]
                } else {
                    Vec::new()
                }
            })
            .collect())
    }
}

/// Reputation checker whose service is always down
pub struct FailingChecker;

#[async_trait]
impl UrlReputationChecker for FailingChecker {
    async fn lookup_urls(
        &self,
        _urls: &[String],
    ) -> Result<Vec<Vec<ThreatMatch>>, SafeBrowsingError> {
        Err(SafeBrowsingError::Status {
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: "backend unavailable".to_string(),
        })
    }
}
