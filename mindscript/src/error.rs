use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JournalError {
    #[error("Database error: {0}")]
    Database(#[from] libsql::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("LLM unavailable: {0}")]
    LlmUnavailable(String),

    #[error("LLM rate limit exceeded, retry after {retry_after:?} seconds")]
    LlmRateLimit { retry_after: Option<u64> },
}

impl JournalError {
    pub fn status(&self) -> StatusCode {
        match self {
            JournalError::NotFound(_) => StatusCode::NOT_FOUND,
            JournalError::Validation(_) | JournalError::Json(_) => StatusCode::BAD_REQUEST,
            JournalError::Conflict(_) => StatusCode::CONFLICT,
            JournalError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            JournalError::Database(_) | JournalError::Io(_) | JournalError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            JournalError::Http(_) | JournalError::Llm(_) => StatusCode::BAD_GATEWAY,
            JournalError::LlmUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            JournalError::LlmRateLimit { .. } => StatusCode::TOO_MANY_REQUESTS,
        }
    }
}

impl From<validator::ValidationErrors> for JournalError {
    fn from(errors: validator::ValidationErrors) -> Self {
        JournalError::Validation(errors.to_string())
    }
}

impl IntoResponse for JournalError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            JournalError::NotFound(msg)
            | JournalError::Validation(msg)
            | JournalError::Conflict(msg)
            | JournalError::PayloadTooLarge(msg)
            | JournalError::Internal(msg)
            | JournalError::Llm(msg)
            | JournalError::LlmUnavailable(msg) => msg.clone(),
            JournalError::Database(e) => e.to_string(),
            JournalError::Http(e) => e.to_string(),
            JournalError::Json(e) => e.to_string(),
            JournalError::Io(e) => e.to_string(),
            JournalError::LlmRateLimit { .. } => self.to_string(),
        };

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        }

        let body = Json(json!({
            "error": message,
            "code": status.as_u16()
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, JournalError>;
