use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::generation::generator::GenerationFailure;
use crate::render::RenderError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant renders as a status object with a null payload:
/// `{"status": "error", "code", "message", "resume_data": null}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Generation error: {0}")]
    Generation(#[from] GenerationFailure),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Malformed or incomplete request bodies are client errors, reported in the
/// same status object as every other failure.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Generation(e) => {
                tracing::error!("Generation error: {e}");
                let code = match e {
                    GenerationFailure::Upstream(_) => "GENERATOR_UNAVAILABLE",
                    GenerationFailure::NotAMapping(_) => "GENERATOR_BAD_OUTPUT",
                };
                (StatusCode::BAD_GATEWAY, code, e.to_string())
            }
            AppError::Render(e) => {
                tracing::error!("Render error: {e}");
                let code = match e {
                    RenderError::Binding(_) => "RENDER_BINDING_ERROR",
                    RenderError::Rasterize(_) => "RENDER_RASTERIZE_ERROR",
                    RenderError::TimedOut(_) => "RENDER_TIMEOUT",
                };
                (StatusCode::INTERNAL_SERVER_ERROR, code, e.to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "status": "error",
            "code": code,
            "message": message,
            "resume_data": null
        }));

        (status, body).into_response()
    }
}
