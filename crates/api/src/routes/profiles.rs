//! Route definitions for profile submission.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::profiles;
use crate::state::AppState;

/// Routes mounted at `/profiles`.
///
/// ```text
/// POST   /            -> submit_profile
/// GET    /{handle}    -> get_profile
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(profiles::submit_profile))
        .route("/{handle}", get(profiles::get_profile))
}
