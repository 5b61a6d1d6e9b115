use chrono::Utc;
use std::sync::Arc;

use crate::core::error::Result;
use crate::features::categories::Category;
use crate::features::links::dtos::{PageMessages, SubmitLinkForm};
use crate::features::links::models::{CreateLink, Link};
use crate::features::links::services::LinkService;
use crate::modules::safe_browsing::UrlReputationChecker;
use crate::shared::constants::{
    MSG_ALREADY_ADDED, MSG_LINK_ADDED, MSG_PASSCODE_MISMATCH, MSG_URL_NOT_ALLOWED,
};

/// Result of a single submission attempt. Exactly one per attempt.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub enum SubmissionOutcome {
    Added(Link),
    PasscodeMismatch,
    AlreadyAdded,
    UrlNotAllowed,
}

impl SubmissionOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            SubmissionOutcome::Added(_) => MSG_LINK_ADDED,
            SubmissionOutcome::PasscodeMismatch => MSG_PASSCODE_MISMATCH,
            SubmissionOutcome::AlreadyAdded => MSG_ALREADY_ADDED,
            SubmissionOutcome::UrlNotAllowed => MSG_URL_NOT_ALLOWED,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Added(_))
    }
}

impl From<SubmissionOutcome> for PageMessages {
    fn from(outcome: SubmissionOutcome) -> Self {
        let mut messages = PageMessages::default();
        let message = outcome.message().to_string();
        if outcome.is_success() {
            messages.success.push(message);
        } else {
            messages.failures.push(message);
        }
        messages
    }
}

/// Gatekeeper for new links: passcode, duplicate, then reputation check.
pub struct SubmissionService {
    links: Arc<LinkService>,
    checker: Arc<dyn UrlReputationChecker>,
}

impl SubmissionService {
    pub fn new(links: Arc<LinkService>, checker: Arc<dyn UrlReputationChecker>) -> Self {
        Self { links, checker }
    }

    /// Rejections are returned as outcomes; only storage and reputation
    /// service failures are errors.
    pub async fn submit(
        &self,
        category: &Category,
        form: &SubmitLinkForm,
    ) -> Result<SubmissionOutcome> {
        if !category.passcode_matches(&form.passcode) {
            tracing::info!("Passcode mismatch for category {}", category.slug);
            return Ok(SubmissionOutcome::PasscodeMismatch);
        }

        if self.links.exists(&category.slug, &form.url).await? {
            return Ok(SubmissionOutcome::AlreadyAdded);
        }

        let threats = self
            .checker
            .lookup_urls(std::slice::from_ref(&form.url))
            .await?;
        if threats.first().is_some_and(|t| !t.is_empty()) {
            tracing::warn!("URL unsafe: {}, threats: {:?}", form.url, threats);
            return Ok(SubmissionOutcome::UrlNotAllowed);
        }

        let link = self
            .links
            .create(CreateLink {
                category: category.slug.clone(),
                name: form.name.clone(),
                url: form.url.clone(),
                notes: form.notes.clone(),
                added: Utc::now(),
            })
            .await?;

        Ok(SubmissionOutcome::Added(link))
    }
}
