use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::analyzer::AnalysisError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Completion service error: {0}")]
    Service(String),
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        let message = err.to_string();
        match err {
            AnalysisError::Validation(_) => AppError::Validation(message),
            AnalysisError::Authentication(_) => AppError::Unauthorized(message),
            AnalysisError::Network(_) => AppError::Network(message),
            AnalysisError::Service { .. } => AppError::Service(message),
            AnalysisError::Extraction(_) | AnalysisError::JsonParsing(_) => {
                AppError::UnprocessableEntity(message)
            }
        }
    }
}

/// Bodies that are not a JSON object of string fields are a client input error.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Completion failures are shown to the user verbatim.
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                "AUTHENTICATION_ERROR",
                msg.clone(),
            ),
            AppError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                msg.clone(),
            ),
            AppError::Network(msg) => (StatusCode::BAD_GATEWAY, "NETWORK_ERROR", msg.clone()),
            AppError::Service(msg) => (StatusCode::BAD_GATEWAY, "SERVICE_ERROR", msg.clone()),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
