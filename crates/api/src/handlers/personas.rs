//! Handlers for the persona catalog and assignment preview.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use xeno_core::error::CoreError;
use xeno_core::persona::{assign_persona, eligible_rank, Persona, ProfileMetrics, RankClass};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// One rank tier of the catalog.
#[derive(Debug, Serialize)]
pub struct CatalogTier {
    pub rank_class: RankClass,
    pub flame_count: u8,
    pub personas: Vec<Persona>,
}

/// The catalog grouped by rank, highest first.
#[derive(Debug, Serialize)]
pub struct CatalogView {
    pub default_persona: Persona,
    pub tiers: Vec<CatalogTier>,
}

/// Request body for `POST /personas/assign`.
#[derive(Debug, Deserialize)]
pub struct AssignPreviewRequest {
    pub followers: i64,
    pub posts: i64,
}

/// Persona a profile with the given metrics would receive.
#[derive(Debug, Serialize)]
pub struct AssignPreview {
    pub eligible_rank: RankClass,
    pub persona: Persona,
}

/// GET /api/v1/personas
pub async fn list_personas(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let tiers = RankClass::ALL
        .iter()
        .rev()
        .map(|&rank| CatalogTier {
            rank_class: rank,
            flame_count: rank.flame_count(),
            personas: state.catalog.tier(rank).into_iter().cloned().collect(),
        })
        .collect();

    Ok(Json(DataResponse {
        data: CatalogView {
            default_persona: state.catalog.default_persona().clone(),
            tiers,
        },
    }))
}

/// POST /api/v1/personas/assign
///
/// Runs the assignment engine without touching storage. Each call draws a
/// fresh persona from the eligible tier.
pub async fn preview_assignment(
    State(state): State<AppState>,
    Json(input): Json<AssignPreviewRequest>,
) -> AppResult<impl IntoResponse> {
    if input.followers < 0 || input.posts < 0 {
        let message = "followers and posts must be non-negative".to_string();
        return Err(CoreError::Validation(message).into());
    }

    let metrics = ProfileMetrics::new(input.followers, input.posts);
    let persona = assign_persona(metrics, &state.catalog, &mut rand::rng());

    Ok(Json(DataResponse {
        data: AssignPreview {
            eligible_rank: eligible_rank(metrics),
            persona,
        },
    }))
}
