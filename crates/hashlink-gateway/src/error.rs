use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use hashlink_core::ShortenerError;
use thiserror::Error;
use tracing::error;

use crate::model::ErrorResponse;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid request body: {0}")]
    BadRequest(String),
    #[error("short code not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Shortener(#[from] ShortenerError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Shortener(ShortenerError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            AppError::Shortener(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            error!(error = %self, "Request failed");
            "internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashlink_core::StorageError;

    #[test]
    fn status_mapping() {
        assert_eq!(
            AppError::BadRequest("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound("abc123".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(ShortenerError::InvalidInput("bad url".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(ShortenerError::CollisionUnresolved {
                url: "https://example.com".into(),
                attempts: 2,
            })
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::from(ShortenerError::StoreUnavailable(StorageError::Timeout(
                "pool".into()
            )))
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
