use sqlx::FromRow;

/// Database model for category
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub passcode: String,
    /// Trusted HTML shown above the link list
    pub page_top_blurb: Option<String>,
}

impl Category {
    /// Plain equality against the stored shared secret
    pub fn passcode_matches(&self, candidate: &str) -> bool {
        self.passcode == candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category() -> Category {
        Category {
            id: 1,
            name: "Hawaii".to_string(),
            slug: "hawaii".to_string(),
            passcode: "aloha".to_string(),
            page_top_blurb: None,
        }
    }

    #[test]
    fn test_passcode_matches_exact() {
        assert!(category().passcode_matches("aloha"));
    }

    #[test]
    fn test_passcode_is_case_sensitive() {
        assert!(!category().passcode_matches("Aloha"));
        assert!(!category().passcode_matches("aloha "));
        assert!(!category().passcode_matches(""));
    }
}
