pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Body of every error response.
///
/// ```json
/// {
///   "code": 1004,
///   "error": "NOT_FOUND",
///   "message": "User not found"
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Structured details, e.g. per-field validation errors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// Errors a handler can return; each renders as an [`ErrorResponse`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Not Found: {0}")]
    NotFound(String),
}

struct ErrorParts {
    status: StatusCode,
    code: ErrorCode,
    message: String,
    details: Option<Value>,
}

impl ErrorParts {
    fn new(status: StatusCode, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            details: None,
        }
    }

    fn with_default_message(status: StatusCode, code: ErrorCode) -> Self {
        Self::new(status, code, code.default_message())
    }
}

impl AppError {
    fn into_parts(self) -> ErrorParts {
        match self {
            AppError::Database(e) => map_db_error(&e),
            AppError::JsonExtractorRejection(e) => {
                ErrorParts::new(e.status(), ErrorCode::JsonExtraction, e.body_text())
            }
            AppError::ValidationError(e) => ErrorParts {
                details: Some(validation_details(&e)),
                ..ErrorParts::with_default_message(StatusCode::BAD_REQUEST, ErrorCode::ValidationError)
            },
            AppError::InvalidId(msg) => ErrorParts::new(StatusCode::BAD_REQUEST, ErrorCode::InvalidId, msg),
            AppError::NotFound(msg) => ErrorParts::new(StatusCode::NOT_FOUND, ErrorCode::NotFound, msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let description = self.to_string();
        let parts = self.into_parts();

        if parts.status.is_server_error() {
            tracing::error!(
                error_code = parts.code.code(),
                status = parts.status.as_u16(),
                "{}",
                description
            );
        } else {
            tracing::info!(
                error_code = parts.code.code(),
                status = parts.status.as_u16(),
                "{}",
                description
            );
        }

        let body = ErrorResponse {
            code: parts.code.code(),
            error: parts.code.as_str().to_string(),
            message: parts.message,
            details: parts.details,
        };

        (parts.status, Json(body)).into_response()
    }
}

/// Maps SeaORM errors to a status and code without exposing driver text.
fn map_db_error(error: &DbErr) -> ErrorParts {
    match error {
        DbErr::RecordNotFound(_) => {
            ErrorParts::with_default_message(StatusCode::NOT_FOUND, ErrorCode::DatabaseNotFound)
        }
        DbErr::ConnectionAcquire(_) => ErrorParts::with_default_message(
            StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::DatabasePoolTimeout,
        ),
        DbErr::Conn(_) => ErrorParts::with_default_message(
            StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::DatabaseConnection,
        ),
        DbErr::Exec(_) | DbErr::Query(_) => ErrorParts::with_default_message(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::DatabaseError,
        ),
        _ => ErrorParts::with_default_message(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::DatabaseUnhandled,
        ),
    }
}

/// `{ "field": [{ "code", "message", "params" }] }` for each invalid field.
fn validation_details(errors: &ValidationErrors) -> Value {
    let fields = errors
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let entries: Vec<Value> = errors
                .iter()
                .map(|err| {
                    serde_json::json!({
                        "code": err.code,
                        "message": err.message,
                        "params": err.params,
                    })
                })
                .collect();
            (camel_case(field), Value::Array(entries))
        })
        .collect::<serde_json::Map<_, _>>();

    Value::Object(fields)
}

/// `first_name` -> `firstName`, matching the camelCase request bodies.
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Build an error response outside of [`AppError`], e.g. for fallbacks.
pub fn error_response(status: StatusCode, message: String, error_code: ErrorCode) -> Response {
    let body = Json(ErrorResponse {
        code: error_code.code(),
        error: error_code.as_str().to_string(),
        message,
        details: None,
    });

    (status, body).into_response()
}
