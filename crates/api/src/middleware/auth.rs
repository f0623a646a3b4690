//! Bearer-token identity extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use xeno_core::error::CoreError;
use xeno_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The calling user, taken from a JWT Bearer token in the `Authorization` header.
///
/// Handlers that act on behalf of a user (casting a vote) take this as an
/// extractor parameter; the voter is never read from the request body:
///
/// ```ignore
/// async fn cast_vote(auth: AuthUser, Json(input): Json<CastVoteRequest>) -> AppResult<...> {
///     tracing::info!(voter_id = auth.user_id, "casting vote");
///     ...
/// }
/// ```
///
/// Missing header, non-`Bearer` scheme and bad or expired tokens are all
/// rejected with 401 `UNAUTHORIZED`.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The caller's internal user id (from `claims.sub`).
    pub user_id: DbId,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        // Scheme is case-sensitive: "bearer <token>" is rejected.
        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
        })
    }
}
