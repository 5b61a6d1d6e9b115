use serde::{Deserialize, Serialize};

use crate::features::categories::Category;
use crate::features::links::models::Link;

/// URL-encoded submission form. Missing fields are empty strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmitLinkForm {
    pub passcode: String,
    pub name: String,
    pub url: String,
    pub notes: String,
}

/// Last-submitted values echoed back into the form
#[derive(Debug, Clone, Default, Serialize)]
pub struct FormValuesDto {
    pub name: String,
    pub url: String,
    pub notes: String,
}

impl From<&SubmitLinkForm> for FormValuesDto {
    fn from(form: &SubmitLinkForm) -> Self {
        Self {
            name: form.name.clone(),
            url: form.url.clone(),
            notes: form.notes.clone(),
        }
    }
}

/// A link as shown on the category page
#[derive(Debug, Clone, Serialize)]
pub struct LinkDisplayDto {
    pub name: String,
    pub url: String,
    pub notes: String,
    /// `YYYY-MM-DD` in UTC
    pub added: Option<String>,
}

impl From<Link> for LinkDisplayDto {
    fn from(link: Link) -> Self {
        let added = link.added_at().map(|dt| dt.format("%Y-%m-%d").to_string());
        Self {
            name: link.name,
            url: link.url,
            notes: link.notes.unwrap_or_default(),
            added,
        }
    }
}

/// Success and failure messages collected while handling a request
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageMessages {
    pub success: Vec<String>,
    pub failures: Vec<String>,
}

/// Context for the category page template
#[derive(Debug, Clone, Serialize)]
pub struct CategoryPageDto {
    pub name: String,
    pub page_top_blurb: String,
    pub links: Vec<LinkDisplayDto>,
    pub success_messages: Vec<String>,
    pub failure_messages: Vec<String>,
    pub form_values: FormValuesDto,
}

impl CategoryPageDto {
    pub fn new(
        category: &Category,
        links: Vec<Link>,
        messages: PageMessages,
        form_values: FormValuesDto,
    ) -> Self {
        Self {
            name: category.name.clone(),
            page_top_blurb: category.page_top_blurb.clone().unwrap_or_default(),
            links: links.into_iter().map(LinkDisplayDto::from).collect(),
            success_messages: messages.success,
            failure_messages: messages.failures,
            form_values,
        }
    }
}
