use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

pub const EXTRACTION_MESSAGE: &str =
    "Could not extract text from the file. Please try a different document.";
pub const MISSING_INPUT_MESSAGE: &str = "Please upload a study material first.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Upload exceeded the configured byte cap.
    #[error("Payload too large: limit is {0} bytes")]
    PayloadTooLarge(usize),

    /// The document produced no text. The session's text slot has been cleared.
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// An operation needs a slot that is still empty. Nothing was mutated.
    #[error("Missing input: {0}")]
    MissingInput(&'static str),

    /// The inference call failed. Nothing was stored.
    #[error("Inference error: {0}")]
    Inference(#[from] LlmError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::PayloadTooLarge(limit) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                format!("File is larger than the {limit} byte upload limit."),
            ),
            AppError::Extraction(detail) => {
                tracing::warn!("Extraction error: {detail}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "EXTRACTION_ERROR",
                    EXTRACTION_MESSAGE.to_string(),
                )
            }
            AppError::MissingInput(slot) => {
                tracing::debug!("Missing input: {slot}");
                (
                    StatusCode::CONFLICT,
                    "MISSING_INPUT",
                    MISSING_INPUT_MESSAGE.to_string(),
                )
            }
            AppError::Inference(e) => {
                tracing::error!("Inference error: {e}");
                (StatusCode::BAD_GATEWAY, "INFERENCE_ERROR", e.to_string())
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
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
