use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use xeno_core::paging::clamp_offset;
use xeno_db::models::user::LeaderboardEntry;
use xeno_db::repositories::UserRepo;

use crate::error::AppResult;
use crate::query::LeaderboardParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Leaderboard row with its 1-based position in the full ordering.
#[derive(Debug, Serialize)]
pub struct RankedEntry {
    pub position: i64,
    #[serde(flatten)]
    pub entry: LeaderboardEntry,
}

/// GET /api/v1/leaderboard
///
/// Ordered by persona rank, then reputation score, then id. `search`
/// narrows by handle substring; positions are relative to the filtered
/// ordering.
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(params): Query<LeaderboardParams>,
) -> AppResult<impl IntoResponse> {
    let entries = UserRepo::leaderboard(
        &state.pool,
        params.search.as_deref(),
        params.limit,
        params.offset,
    )
    .await?;

    let offset = clamp_offset(params.offset);
    let ranked: Vec<RankedEntry> = entries
        .into_iter()
        .zip(offset + 1..)
        .map(|(entry, position)| RankedEntry { position, entry })
        .collect();

    Ok(Json(DataResponse { data: ranked }))
}
