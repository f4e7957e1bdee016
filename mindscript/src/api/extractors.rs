use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts};
use axum::http::StatusCode;
use axum_extra::extract::QueryRejection;

use crate::error::JournalError;

/// `axum::Json` with rejections reported as [`JournalError`] JSON bodies.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(JournalError))]
pub struct AppJson<T>(pub T);

/// `axum_extra::extract::Query` with bad query strings reported as 400 JSON bodies.
#[derive(FromRequestParts)]
#[from_request(via(axum_extra::extract::Query), rejection(JournalError))]
pub struct AppQuery<T>(pub T);

impl From<QueryRejection> for JournalError {
    fn from(rejection: QueryRejection) -> Self {
        JournalError::Validation(rejection.body_text())
    }
}

impl From<JsonRejection> for JournalError {
    fn from(rejection: JsonRejection) -> Self {
        map_json_rejection(rejection)
    }
}

fn map_json_rejection(rejection: JsonRejection) -> JournalError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let message = err.body_text();
            if let Some(field) = extract_missing_field(&message) {
                JournalError::Validation(format!("Missing required field: {field}"))
            } else {
                JournalError::Validation(format!("Invalid JSON: {message}"))
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            JournalError::Validation(format!("JSON syntax error: {}", err.body_text()))
        }
        JsonRejection::MissingJsonContentType(_) => {
            JournalError::Validation("Missing `Content-Type: application/json` header".to_string())
        }
        JsonRejection::BytesRejection(err) if err.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            JournalError::PayloadTooLarge("Request body too large".to_string())
        }
        JsonRejection::BytesRejection(_) => {
            JournalError::Internal("Failed to read request body".to_string())
        }
        _ => JournalError::Validation(rejection.body_text()),
    }
}

fn extract_missing_field(message: &str) -> Option<&str> {
    let prefix = "missing field `";
    let start = message.find(prefix)? + prefix.len();
    let remaining = message.get(start..)?;
    let end = remaining.find('`')?;
    remaining.get(..end)
}
