use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractionError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant maps to 500 with a `{ "error": "<message>" }` body; callers
/// cannot tell a bad request from an upstream outage by status code alone.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("No resume text provided")]
    MissingInput,

    #[error("OPENAI_API_KEY not configured")]
    MissingCredential,

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Malformed model output: {0}")]
    MalformedModelOutput(String),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// The message placed in the error envelope. Upstream and internal details
    /// stay in the server log.
    pub fn public_message(&self) -> String {
        match self {
            AppError::MissingInput => "No resume text provided".to_string(),
            AppError::MissingCredential => "OPENAI_API_KEY not configured".to_string(),
            AppError::Upstream(_) => "Language model request failed".to_string(),
            AppError::MalformedModelOutput(_) => {
                "Language model returned malformed JSON".to_string()
            }
            AppError::Extraction(e) => e.user_message(),
            AppError::Internal(_) => "An internal server error occurred".to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn log(&self) {
        match self {
            AppError::MissingInput => tracing::warn!("Rejected request: {self}"),
            AppError::MissingCredential => tracing::error!("Misconfiguration: {self}"),
            AppError::Upstream(msg) => tracing::error!("LLM error: {msg}"),
            AppError::MalformedModelOutput(msg) => {
                tracing::error!("LLM returned unparseable output: {msg}")
            }
            AppError::Extraction(e) => tracing::warn!("Extraction failed: {e}"),
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
        }
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::MissingCredential => AppError::MissingCredential,
            other => AppError::Upstream(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();

        let body = Json(json!({
            "error": self.public_message()
        }));

        (self.status(), body).into_response()
    }
}
