use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::modules::safe_browsing::SafeBrowsingError;
use crate::shared::constants::TECHNICAL_ISSUES_MESSAGE;
use crate::shared::templates::TemplateError;

/// Internal failures. User-facing rejections (wrong passcode, duplicate
/// link, unsafe URL) are not errors; they travel as page messages.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("External service error: {0}")]
    ExternalService(#[from] SafeBrowsingError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Database(ref e) => tracing::error!("Database error: {:?}", e),
            AppError::Template(ref e) => tracing::error!("Template error: {}", e),
            AppError::ExternalService(ref e) => tracing::error!("External service error: {}", e),
            AppError::Internal(ref msg) => tracing::error!("Internal error: {}", msg),
        }

        (StatusCode::INTERNAL_SERVER_ERROR, TECHNICAL_ISSUES_MESSAGE).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let response = AppError::Internal("pool exhausted".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(body, TECHNICAL_ISSUES_MESSAGE.as_bytes());
    }

    #[test]
    fn test_database_error_converts() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::Database(_)));
    }
}
