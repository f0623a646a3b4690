//! Handlers for the reputation ledger.
//!
//! The voter is always the authenticated caller. Each cast is one ledger
//! transaction; see `VoteRepo::cast_vote`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use xeno_core::error::CoreError;
use xeno_core::ledger::VoteValue;
use xeno_core::types::DbId;
use xeno_db::repositories::VoteRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /votes`.
///
/// `value` is kept as raw JSON so a non-integer is reported as a validation
/// error in the usual error body rather than as a body parse failure.
#[derive(Debug, Deserialize)]
pub struct CastVoteRequest {
    pub target_id: DbId,
    pub value: serde_json::Value,
}

/// POST /api/v1/votes
///
/// 201 when a new vote was recorded, 200 when an existing vote flipped.
pub async fn cast_vote(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CastVoteRequest>,
) -> AppResult<impl IntoResponse> {
    let value = match input.value.as_i64() {
        Some(raw) => VoteValue::try_from(raw)?,
        None => {
            let message = format!("Invalid vote value {}; expected 1 or -1", input.value);
            return Err(CoreError::Validation(message).into());
        }
    };

    let outcome = VoteRepo::cast_vote(&state.pool, auth.user_id, input.target_id, value).await?;

    tracing::info!(
        voter_id = auth.user_id,
        target_id = input.target_id,
        transition = outcome.transition,
        delta = outcome.score_delta,
        "Vote cast",
    );

    let status = if outcome.transition == "created" {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(DataResponse { data: outcome })))
}

/// GET /api/v1/votes/{target_id}
///
/// The caller's current vote on the target, or 204 when there is none.
pub async fn get_my_vote(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(target_id): Path<DbId>,
) -> AppResult<Response> {
    let vote = VoteRepo::find(&state.pool, auth.user_id, target_id).await?;

    Ok(match vote {
        Some(vote) => Json(DataResponse { data: vote }).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}
