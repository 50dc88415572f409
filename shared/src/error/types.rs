//! `AppError` and the JSON failure body

use super::category::ErrorCategory;
use super::codes::ErrorCode;
use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A failed request: machine code plus detail text
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct AppError {
    pub code: ErrorCode,
    /// Sent to the client as `detail`
    pub message: String,
}

impl AppError {
    /// Error with the code's stock message
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
        }
    }

    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    /// `validation_error` (400)
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationError, msg)
    }

    /// `resource_not_found` (404); the same text whether the row is missing or
    /// belongs to another tenant
    pub fn not_found(resource: impl std::fmt::Display, id: u64) -> Self {
        Self::with_message(
            ErrorCode::ResourceNotFound,
            format!("No {resource} with id {id} for tenant"),
        )
    }

    /// `entity_not_found` (404) for a collection name outside the catalog
    pub fn unknown_entity(entity: &str) -> Self {
        Self::with_message(ErrorCode::EntityNotFound, format!("Unknown entity '{entity}'"))
    }

    /// `invalid_reference` (400) for a foreign key that does not resolve
    pub fn invalid_reference(field: &str, id: u64) -> Self {
        Self::with_message(
            ErrorCode::InvalidReference,
            format!("{field} {id} does not exist for tenant"),
        )
    }

    /// `internal_error` (500)
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }
}

/// JSON body returned for every failed request
///
/// ```json
/// {"error": "tab_already_open", "detail": "Table already has an open tab"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorCode,
    pub detail: String,
}

impl From<&AppError> for ErrorBody {
    fn from(err: &AppError) -> Self {
        Self {
            error: err.code,
            detail: err.message.clone(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.code.category() == ErrorCategory::System {
            tracing::error!(code = %self.code, detail = %self.message, "Request failed on the server side");
        }
        (self.http_status(), Json(ErrorBody::from(&self))).into_response()
    }
}
