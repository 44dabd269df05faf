//! Request extraction helpers.

use axum::extract::{FromRequest, Request};
use axum::Json;
use hyra_core::validate::Sanitize;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::error::{AppError, FieldIssue};
use crate::state::AppState;

/// JSON body extractor that sanitizes, then validates.
///
/// Deserialization happens first; the payload is then canonicalized via
/// [`Sanitize`] so validation rules apply to the cleaned values, and finally
/// validated. Failures surface *every* failing field as
/// `{"error": "Validation error", "issues": [...]}`.
pub struct ValidatedJson<T>(pub T);

impl<T> FromRequest<AppState> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Sanitize,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let Json(mut value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            AppError::Validation(vec![FieldIssue {
                field: "body".to_string(),
                message: rejection.body_text(),
            }])
        })?;

        value.sanitize();
        value
            .validate()
            .map_err(|errors| AppError::Validation(collect_issues(&errors)))?;

        Ok(ValidatedJson(value))
    }
}

/// Flatten [`ValidationErrors`] into one issue per failing rule, sorted by
/// field name for deterministic output.
pub fn collect_issues(errors: &ValidationErrors) -> Vec<FieldIssue> {
    let mut issues = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| error.code.to_string());
            issues.push(FieldIssue {
                field: field.to_string(),
                message,
            });
        }
    }
    issues.sort_by(|a, b| a.field.cmp(&b.field));
    issues
}
