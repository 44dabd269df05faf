use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use hyra_core::error::DomainError;
use serde::Serialize;
use serde_json::json;

use crate::identity::IdentityError;
use crate::storage::StorageError;

/// A single failing field in a validation error response.
#[derive(Debug, Clone, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

/// Application-level error type for HTTP handlers.
///
/// Wraps [`DomainError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses:
/// `{"error": "..."}`, or `{"error": "Validation error", "issues": [...]}`
/// for schema failures.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `hyra_core`.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An identity-provider error.
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// An object-store error.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// One or more request fields failed validation.
    #[error("Validation error")]
    Validation(Vec<FieldIssue>),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            // --- DomainError variants ---
            AppError::Domain(domain) => match domain {
                DomainError::NotFound { .. } => (StatusCode::NOT_FOUND, domain.to_string()),
                DomainError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                DomainError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
                DomainError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
                DomainError::InvalidDateRange(_)
                | DomainError::SelfBookingForbidden
                | DomainError::DateConflict(_)
                | DomainError::DuplicateListing => (StatusCode::BAD_REQUEST, domain.to_string()),
                DomainError::Upstream(msg) => {
                    tracing::error!(error = %msg, "Upstream failure");
                    (StatusCode::INTERNAL_SERVER_ERROR, domain.to_string())
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- Identity-provider errors ---
            AppError::Identity(err) => match err {
                IdentityError::EmailTaken | IdentityError::InvalidCredentials => {
                    (StatusCode::BAD_REQUEST, err.to_string())
                }
                IdentityError::Database(inner) => classify_sqlx_error(inner),
                IdentityError::Credential(msg) => {
                    tracing::error!(error = %msg, "Credential backend error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Object-store errors ---
            AppError::Storage(err) => match err {
                StorageError::AlreadyExists => (StatusCode::BAD_REQUEST, err.to_string()),
                StorageError::Io(inner) => {
                    tracing::error!(error = %inner, "Object store error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Validation errors carry per-field issues ---
            AppError::Validation(issues) => {
                let body = json!({
                    "error": "Validation error",
                    "issues": issues,
                });
                return (StatusCode::BAD_REQUEST, axum::Json(body)).into_response();
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({ "error": message });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status and user-facing message.
///
/// - `RowNotFound` maps to 404.
/// - Exclusion violations (PostgreSQL `23P01`) on the booking overlap
///   constraint map to the same date-conflict message the handler pre-checks
///   produce; the constraint is the authoritative guard against races.
/// - Unique violations (`23505`) map to 400.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, String) {
    match err {
        sqlx::Error::RowNotFound => (StatusCode::NOT_FOUND, "Resource not found".to_string()),
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint().unwrap_or("");
            match db_err.code().as_deref() {
                // Exclusion constraint violation.
                Some("23P01") if constraint == "bookings_no_overlap_per_property" => (
                    StatusCode::BAD_REQUEST,
                    "These dates are already booked for this property.".to_string(),
                ),
                // Unique constraint violation.
                Some("23505") if constraint.contains("email") => (
                    StatusCode::BAD_REQUEST,
                    "Email is already registered.".to_string(),
                ),
                Some("23505") => (
                    StatusCode::BAD_REQUEST,
                    format!("Duplicate value violates unique constraint: {constraint}"),
                ),
                _ => {
                    tracing::error!(error = %db_err, "Database error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "An internal error occurred".to_string(),
                    )
                }
            }
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal error occurred".to_string(),
            )
        }
    }
}
