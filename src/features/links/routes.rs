use std::path::Path;

use axum::{
    routing::{any, get},
    Router,
};
use tower_http::services::ServeDir;

use crate::features::links::handlers::{self, PageState};

/// Create routes for the link pages
///
/// Static assets are served unmodified from `assets_dir`; every path that is
/// neither an asset nor a single slug segment falls through to the lost page.
pub fn routes(state: PageState, assets_dir: &Path) -> Router {
    Router::new()
        .nest_service("/css", ServeDir::new(assets_dir.join("css")))
        .nest_service("/img", ServeDir::new(assets_dir.join("img")))
        .nest_service("/js", ServeDir::new(assets_dir.join("js")))
        .route("/favicon.ico", get(handlers::favicon))
        .route("/{slug}", any(handlers::category_page))
        .fallback(handlers::you_are_lost)
        .with_state(state)
}
