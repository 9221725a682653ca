//! JSON error responses for the HTTP API.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use staffsearch_common::StaffSearchError;
use std::fmt;

/// API error with status code and client-facing message
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Failure of a search request; server-side errors keep only a short
    /// message, client errors pass through
    pub fn search_failed(err: StaffSearchError) -> Self {
        if err.is_client_error() {
            return err.into();
        }
        tracing::error!("Search failed: {}", err);
        Self::new(status_of(&err), format!("Search failed: {}", short_message(&err)))
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

fn status_of(err: &StaffSearchError) -> StatusCode {
    StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Category-level description without provider payloads
fn short_message(err: &StaffSearchError) -> &'static str {
    match err {
        StaffSearchError::Embedding(_) => "embedding provider unavailable",
        StaffSearchError::DimensionMismatch { .. } => "embedding dimension mismatch",
        StaffSearchError::Source(_) | StaffSearchError::Network(_) => "upstream service unavailable",
        _ => "internal error",
    }
}

impl From<StaffSearchError> for ApiError {
    fn from(err: StaffSearchError) -> Self {
        let status = status_of(&err);
        let message = match &err {
            StaffSearchError::InvalidInput(msg) | StaffSearchError::NotFound(msg) => msg.clone(),
            other if other.is_client_error() => other.to_string(),
            other => {
                tracing::error!("Request failed: {}", other);
                short_message(other).to_string()
            }
        };
        Self { status, message }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(json!({ "error": self.message }))
    }
}
