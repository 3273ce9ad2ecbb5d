use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tinylink_core::{ShortCode, ShortenerError};
use tracing::error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("short link not found: {0}")]
    NotFound(ShortCode),
    #[error("stored url cannot be used as a redirect target: {0}")]
    InvalidRedirectTarget(String),
    #[error(transparent)]
    Shortener(#[from] ShortenerError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "short link not found").into_response(),
            AppError::InvalidRedirectTarget(url) => {
                error!(url = %url, "stored url is not a valid location header");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "stored url cannot be used as a redirect target",
                )
                    .into_response()
            }
            AppError::Shortener(ShortenerError::EmptyUrl) => {
                (StatusCode::BAD_REQUEST, "link must not be empty").into_response()
            }
            AppError::Shortener(ShortenerError::Storage(e)) => {
                error!(error = %e, "storage operation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal storage error").into_response()
            }
        }
    }
}
