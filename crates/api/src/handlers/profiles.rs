//! Handlers for profile submission.
//!
//! Submitting a handle fetches its public metrics, assigns a persona from
//! the tier those metrics qualify for, and inserts or refreshes the
//! directory row. Resubmitting re-rolls the persona from the current tier.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use xeno_core::error::CoreError;
use xeno_core::handle::normalize_handle;
use xeno_core::persona::{assign_persona, ProfileMetrics};
use xeno_db::models::user::UpsertProfile;
use xeno_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /profiles`.
#[derive(Debug, Deserialize)]
pub struct SubmitProfile {
    pub handle: String,
}

/// POST /api/v1/profiles
///
/// Returns 201 when the handle is new and 200 when an existing row was
/// refreshed.
pub async fn submit_profile(
    State(state): State<AppState>,
    Json(input): Json<SubmitProfile>,
) -> AppResult<impl IntoResponse> {
    let handle = normalize_handle(&input.handle)?;

    let fetched = state.profiles.fetch_profile(&handle).await?;
    let metrics = ProfileMetrics::new(fetched.follower_count, fetched.post_count);
    let persona = assign_persona(metrics, &state.catalog, &mut rand::rng());

    let upsert = UpsertProfile {
        handle,
        display_name: fetched.display_name,
        avatar_url: fetched.avatar_url,
        follower_count: fetched.follower_count,
        post_count: fetched.post_count,
        persona,
    };
    let (user, created) = UserRepo::upsert_profile(&state.pool, &upsert).await?;

    tracing::info!(
        user_id = user.id,
        handle = %user.handle,
        persona = %user.persona_name,
        rank = %user.persona_rank,
        created,
        "Profile submitted",
    );

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(DataResponse { data: user })))
}

/// GET /api/v1/profiles/{handle}
pub async fn get_profile(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> AppResult<impl IntoResponse> {
    let handle = normalize_handle(&handle)?;

    let user = UserRepo::find_by_handle(&state.pool, &handle).await?;
    let user = user.ok_or(AppError::Core(CoreError::HandleNotFound {
        entity: "User",
        handle,
    }))?;

    Ok(Json(DataResponse { data: user }))
}
