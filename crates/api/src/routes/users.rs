//! Route definitions for the user directory.

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /                      -> list_users
/// GET    /{id}                  -> get_profile_card
/// GET    /{id}/votes/summary    -> get_vote_summary
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users))
        .route("/{id}", get(users::get_profile_card))
        .route("/{id}/votes/summary", get(users::get_vote_summary))
}
