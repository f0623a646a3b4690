//! Handlers for the user directory and profile cards.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use xeno_core::error::CoreError;
use xeno_core::ledger::VoteTally;
use xeno_core::persona::Persona;
use xeno_core::types::DbId;
use xeno_db::models::user::User;
use xeno_db::repositories::{UserRepo, VoteRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Votes received by a user.
#[derive(Debug, Serialize)]
pub struct VoteSummary {
    pub upvotes: i64,
    pub downvotes: i64,
    pub net: i64,
}

impl From<VoteTally> for VoteSummary {
    fn from(tally: VoteTally) -> Self {
        Self {
            upvotes: tally.upvotes,
            downvotes: tally.downvotes,
            net: tally.net(),
        }
    }
}

/// Persona as shown on a card, with its badge count.
#[derive(Debug, Serialize)]
pub struct CardPersona {
    #[serde(flatten)]
    pub persona: Persona,
    pub flame_count: u8,
}

/// A user with their persona details and vote summary.
#[derive(Debug, Serialize)]
pub struct ProfileCard {
    #[serde(flatten)]
    pub user: User,
    pub persona: CardPersona,
    pub votes: VoteSummary,
}

async fn find_user(state: &AppState, id: DbId) -> AppResult<User> {
    UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))
}

/// GET /api/v1/users
pub async fn list_users(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: users }))
}

/// GET /api/v1/users/{id}
pub async fn get_profile_card(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let user = find_user(&state, id).await?;
    let tally = VoteRepo::tally_for_target(&state.pool, id).await?;

    let persona = user.persona();
    let flame_count = persona.rank_class.flame_count();
    let card = ProfileCard {
        user,
        persona: CardPersona {
            persona,
            flame_count,
        },
        votes: tally.into(),
    };

    Ok(Json(DataResponse { data: card }))
}

/// GET /api/v1/users/{id}/votes/summary
pub async fn get_vote_summary(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_user(&state, id).await?;
    let tally = VoteRepo::tally_for_target(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: VoteSummary::from(tally),
    }))
}
