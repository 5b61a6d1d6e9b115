use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for link
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct Link {
    pub id: i64,
    /// Slug of the owning category
    pub category: String,
    pub name: String,
    pub url: String,
    pub notes: Option<String>,
    /// RFC 3339 UTC timestamp
    pub added: Option<String>,
    /// Present in the schema but never written by the application
    pub safe: i64,
}

impl Link {
    pub fn added_at(&self) -> Option<DateTime<Utc>> {
        self.added
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Data for inserting a new link
#[derive(Debug, Clone)]
pub struct CreateLink {
    pub category: String,
    pub name: String,
    pub url: String,
    pub notes: String,
    pub added: DateTime<Utc>,
}

/// Key used for duplicate detection: ASCII case folded, trailing slashes
/// dropped. Must stay in sync with `rtrim(lower(url), '/')` in SQLite.
pub fn normalize_url(url: &str) -> String {
    url.trim_end_matches('/').to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_url_trailing_slash() {
        assert_eq!(normalize_url("http://x.com"), normalize_url("http://x.com/"));
    }

    #[test]
    fn test_normalize_url_case() {
        assert_eq!(normalize_url("HTTP://X.com/Path"), "http://x.com/path");
    }

    #[test]
    fn test_normalize_url_keeps_inner_slashes() {
        assert_eq!(normalize_url("http://x.com/a/b/"), "http://x.com/a/b");
        assert_ne!(normalize_url("http://x.com/a"), normalize_url("http://x.com/b"));
    }

    #[test]
    fn test_added_at_parses_rfc3339() {
        let link = Link {
            id: 1,
            category: "hawaii".to_string(),
            name: "A".to_string(),
            url: "http://x.com".to_string(),
            notes: None,
            added: Some("2024-05-01T12:30:00Z".to_string()),
            safe: 0,
        };
        let added = link.added_at().unwrap();
        assert_eq!(added.to_rfc3339(), "2024-05-01T12:30:00+00:00");

        let missing = Link { added: None, ..link.clone() };
        assert!(missing.added_at().is_none());

        let garbage = Link {
            added: Some("yesterday".to_string()),
            ..link
        };
        assert!(garbage.added_at().is_none());
    }
}
