//! Error type returned by every handler and its JSON rendering.
//!
//! Failures render as `{"error": <message>, "code": <CODE>}`. Codes are
//! stable and meant for clients to branch on. Messages are for people.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use survex_core::error::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A rule violation or missing entity reported by the domain.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A storage failure. The transaction it ran in has already rolled back
    /// and it is never retried.
    #[error("Storage failure: {0}")]
    Database(#[from] sqlx::Error),
}

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

impl AppError {
    fn classify(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(err) => classify_domain(err),
            AppError::Database(err) => classify_storage(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, error) = self.classify();
        (status, Json(ErrorBody { error, code })).into_response()
    }
}

fn classify_domain(err: &CoreError) -> (StatusCode, &'static str, String) {
    let (status, code) = match err {
        CoreError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        CoreError::NotEligible { .. } => (StatusCode::FORBIDDEN, "NOT_ELIGIBLE"),
        CoreError::DuplicateCompletion { .. } => (StatusCode::CONFLICT, "DUPLICATE_COMPLETION"),
        CoreError::SelfCompletionForbidden { .. } => {
            (StatusCode::FORBIDDEN, "SELF_COMPLETION_FORBIDDEN")
        }
        CoreError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        CoreError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
        CoreError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
        CoreError::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
    };

    let message = match err {
        CoreError::NotFound { entity, id } => format!("{entity} with id {id} not found"),
        CoreError::NotEligible {
            completed,
            required,
        } => format!(
            "Complete {required} surveys before posting your own ({completed} completed so far)"
        ),
        CoreError::DuplicateCompletion { .. } => "You have already completed this survey".into(),
        CoreError::SelfCompletionForbidden { .. } => "You cannot complete your own survey".into(),
        CoreError::Validation(msg)
        | CoreError::Conflict(msg)
        | CoreError::Unauthorized(msg)
        | CoreError::Forbidden(msg) => msg.clone(),
    };

    (status, code, message)
}

/// Storage errors surface as a generic `BACKEND_FAILURE`, except violations
/// of a named `uq_*` constraint, which are conflicts the caller can act on.
///
/// Absent rows never reach this point: lookups return `Option` and handlers
/// turn `None` into [`CoreError::NotFound`]. A stray `RowNotFound` is
/// therefore a broken invariant and reported as a backend failure.
fn classify_storage(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    if let sqlx::Error::Database(db_err) = err {
        if db_err.is_unique_violation() {
            if let Some(constraint) = db_err.constraint().filter(|c| c.starts_with("uq_")) {
                return (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Duplicate value violates unique constraint: {constraint}"),
                );
            }
        }
    }

    tracing::error!(error = %err, "Storage failure");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "BACKEND_FAILURE",
        "A storage error occurred".to_string(),
    )
}
