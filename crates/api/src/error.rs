use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use xeno_core::error::CoreError;
use xeno_core::ledger::LedgerError;
use xeno_db::repositories::VoteError;
use xeno_social::ProfileFetchError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and the ledger and profile-lookup
/// failures, and adds HTTP-specific variants. Implements [`IntoResponse`]
/// to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `xeno_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A rejected or failed vote cast.
    #[error(transparent)]
    Vote(#[from] VoteError),

    /// The social platform lookup failed.
    #[error(transparent)]
    ProfileFetch(#[from] ProfileFetchError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        AppError::Vote(VoteError::Ledger(err))
    }
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::HandleNotFound { entity, handle } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with handle '{handle}' not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- Ledger errors ---
            AppError::Vote(VoteError::Ledger(err)) => classify_ledger_error(err),
            AppError::Vote(VoteError::Persistence(err)) => classify_sqlx_error(err),

            // --- Profile lookup errors ---
            AppError::ProfileFetch(err) => match err {
                ProfileFetchError::NotFound(handle) => (
                    StatusCode::NOT_FOUND,
                    "PROFILE_NOT_FOUND",
                    format!("Profile '{handle}' not found on the social platform"),
                ),
                ProfileFetchError::RateLimited => (
                    StatusCode::TOO_MANY_REQUESTS,
                    "RATE_LIMITED",
                    "Profile lookup is rate limited, try again later".to_string(),
                ),
                ProfileFetchError::Upstream(msg) => {
                    tracing::warn!(error = %msg, "Profile lookup failed");
                    (
                        StatusCode::BAD_GATEWAY,
                        "UPSTREAM_ERROR",
                        "Profile lookup failed".to_string(),
                    )
                }
            },

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Map a ledger rule violation to an HTTP status, error code, and message.
///
/// - Self-votes and repeated identical votes are conflicts (409).
/// - An out-of-range value is a validation error (400).
/// - A missing voter or target is 404.
fn classify_ledger_error(err: &LedgerError) -> (StatusCode, &'static str, String) {
    let (status, code) = match err {
        LedgerError::SelfVote => (StatusCode::CONFLICT, "SELF_VOTE"),
        LedgerError::DuplicateVote => (StatusCode::CONFLICT, "DUPLICATE_VOTE"),
        LedgerError::InvalidValue(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        LedgerError::VoterNotFound(_) | LedgerError::TargetNotFound(_) => {
            (StatusCode::NOT_FOUND, "NOT_FOUND")
        }
    };
    (status, code, err.to_string())
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
