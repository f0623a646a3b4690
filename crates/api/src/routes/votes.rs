//! Route definitions for the reputation ledger. All routes require auth.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::votes;
use crate::state::AppState;

/// Routes mounted at `/votes`.
///
/// ```text
/// POST   /               -> cast_vote
/// GET    /{target_id}    -> get_my_vote
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(votes::cast_vote))
        .route("/{target_id}", get(votes::get_my_vote))
}
