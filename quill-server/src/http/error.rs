//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with the status codes clients of
//! this API already rely on: 401 for validation, 404 for empty results.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::ValidationErrors;

/// Body of the 404 returned when a like references a missing row
pub const MISSING_REFERENCE: &str = "an error occured either user or article not found!";

/// Body of every 500 in production
pub const SERVER_ERROR: &str = "Server Error";

/// Driver error text attached to 500 responses.
///
/// Only rendered to clients when the server runs in development mode.
#[derive(Debug, Clone)]
pub struct ErrorDetail(pub String);

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (401, full list of failures)
    Validation(ValidationErrors),

    /// Query returned no rows (404, `{"data": []}`)
    NotFound,

    /// Like references an article or author that does not exist (404)
    MissingReference,

    /// Request body could not be read, e.g. over the size limit
    Body { status: StatusCode, reason: String },

    /// Database error (500, logged)
    Database(DbError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(errors) => {
                (StatusCode::UNAUTHORIZED, Json(json!({ "message": errors }))).into_response()
            }
            Self::NotFound => (StatusCode::NOT_FOUND, Json(json!({ "data": [] }))).into_response(),
            Self::MissingReference => (
                StatusCode::NOT_FOUND,
                Json(json!({ "message": MISSING_REFERENCE })),
            )
                .into_response(),
            Self::Body { status, reason } => (status, reason).into_response(),
            Self::Database(e) => {
                tracing::error!("Database error: {}", e);
                let mut response = (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR).into_response();
                response.extensions_mut().insert(ErrorDetail(e.to_string()));
                response
            }
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(e: ValidationErrors) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        Self::Database(e)
    }
}
