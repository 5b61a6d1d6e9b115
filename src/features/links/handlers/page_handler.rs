use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, Path, State},
    http::{Method, StatusCode},
    response::{Html, IntoResponse, Response},
    Form,
};

use crate::core::error::Result;
use crate::features::categories::CategoryService;
use crate::features::links::dtos::{CategoryPageDto, FormValuesDto, PageMessages, SubmitLinkForm};
use crate::features::links::services::{LinkService, SubmissionService};
use crate::shared::constants::{LOST_TEMPLATE, PAGE_TEMPLATE};
use crate::shared::templates::TemplateEngine;

/// Shared, read-only state for the page handlers
#[derive(Clone)]
pub struct PageState {
    pub categories: Arc<CategoryService>,
    pub links: Arc<LinkService>,
    pub submissions: Arc<SubmissionService>,
    pub templates: Arc<TemplateEngine>,
}

/// Category page
///
/// Resolves the slug, processes a submission on POST, then renders the
/// category with its links. Unknown slugs get the lost page.
pub async fn category_page(
    State(state): State<PageState>,
    method: Method,
    Path(slug): Path<String>,
    form: std::result::Result<Form<SubmitLinkForm>, FormRejection>,
) -> Result<Response> {
    let Some(category) = state.categories.find_by_slug(&slug).await? else {
        return render_lost(&state.templates);
    };

    let form = match form {
        Ok(Form(form)) => form,
        // Only URL-encoded bodies are read; multipart posts land here too
        Err(rejection) => {
            tracing::warn!("Unreadable form for {}, treating as empty: {}", slug, rejection);
            SubmitLinkForm::default()
        }
    };

    let messages: PageMessages = if method == Method::POST {
        state.submissions.submit(&category, &form).await?.into()
    } else {
        PageMessages::default()
    };

    let links = state.links.list_by_category(&category.slug).await?;

    let page = CategoryPageDto::new(&category, links, messages, FormValuesDto::from(&form));
    let html = state.templates.render(PAGE_TEMPLATE, &page)?;

    Ok(Html(html).into_response())
}

/// Catch-all for paths that do not name a category
pub async fn you_are_lost(State(state): State<PageState>) -> Result<Response> {
    render_lost(&state.templates)
}

pub async fn favicon() -> StatusCode {
    StatusCode::NOT_FOUND
}

fn render_lost(templates: &TemplateEngine) -> Result<Response> {
    let html = templates.render(LOST_TEMPLATE, ())?;
    Ok((StatusCode::NOT_FOUND, Html(html)).into_response())
}
