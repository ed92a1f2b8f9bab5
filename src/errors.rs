use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::services::extraction::ExtractionError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("{0}")]
    Messaging(String),

    #[error("Too many requests from this IP, please try again later.")]
    RateLimited,

    #[error("{0}")]
    NotFound(String),

    #[error("{message}")]
    Internal {
        message: String,
        details: Option<String>,
    },
}

impl AppError {
    /// A 500 whose underlying cause is only exposed when `expose_details` is set.
    pub fn internal(message: &str, cause: impl std::fmt::Display, expose_details: bool) -> Self {
        tracing::error!(error = %cause, "{message}");
        AppError::Internal {
            message: message.to_string(),
            details: expose_details.then(|| cause.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Extraction(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            AppError::Extraction(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Messaging(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match &self {
            AppError::Internal {
                details: Some(details),
                ..
            } => serde_json::json!({ "error": self.to_string(), "details": details }),
            AppError::Extraction(e) if !e.is_client_error() => {
                tracing::error!(error = %e, "document extraction failed");
                serde_json::json!({ "error": "Failed to read the uploaded document." })
            }
            _ => serde_json::json!({ "error": self.to_string() }),
        };
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (
                AppError::Extraction(ExtractionError::EmptyResult),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Extraction(ExtractionError::Ocr("boom".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AppError::RateLimited, StatusCode::TOO_MANY_REQUESTS),
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_internal_hides_details_outside_development() {
        match AppError::internal("Failed", "socket closed", false) {
            AppError::Internal { details, .. } => assert!(details.is_none()),
            other => panic!("unexpected: {other:?}"),
        }
        match AppError::internal("Failed", "socket closed", true) {
            AppError::Internal { details, .. } => {
                assert_eq!(details.as_deref(), Some("socket closed"))
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
