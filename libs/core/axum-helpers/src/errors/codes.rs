//! Type-safe error codes for API responses.
//!
//! Each code has a client-facing identifier (`"NOT_FOUND"`), an integer for
//! logs and dashboards (`1004`) and a default message.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::InvalidId;
//! assert_eq!(code.as_str(), "INVALID_ID");
//! assert_eq!(code.code(), 1002);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error codes carried in every [`super::ErrorResponse`].
///
/// Ranges: 1000-1999 request/service errors, 2000-2999 database errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Request body failed validation
    ValidationError,

    /// Path id is not a valid integer
    InvalidId,

    /// Request body could not be read as JSON
    JsonExtraction,

    NotFound,

    /// No row matched the query
    DatabaseNotFound,

    /// Connection could not be established or was lost
    DatabaseConnection,

    /// Query or statement execution failed
    DatabaseError,

    /// Timed out waiting for a pooled connection
    DatabasePoolTimeout,

    DatabaseUnhandled,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidId => "INVALID_ID",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::DatabaseNotFound => "DATABASE_NOT_FOUND",
            Self::DatabaseConnection => "DATABASE_CONNECTION",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::DatabasePoolTimeout => "DATABASE_POOL_TIMEOUT",
            Self::DatabaseUnhandled => "DATABASE_UNHANDLED",
        }
    }

    /// Integer code for structured logs and metrics.
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidId => 1002,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::DatabaseNotFound => 2001,
            Self::DatabaseError => 2003,
            Self::DatabaseConnection => 2004,
            Self::DatabasePoolTimeout => 2013,
            Self::DatabaseUnhandled => 2099,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::InvalidId => "Invalid id format",
            Self::JsonExtraction => "Failed to parse request body",
            Self::NotFound => "Resource not found",
            Self::DatabaseNotFound => "Database record not found",
            Self::DatabaseConnection => "Database connection error",
            Self::DatabaseError => "Database error occurred",
            Self::DatabasePoolTimeout => "Database connection pool timed out",
            Self::DatabaseUnhandled => "Unhandled database error",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
