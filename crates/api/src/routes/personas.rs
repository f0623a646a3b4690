//! Route definitions for the persona catalog.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::personas;
use crate::state::AppState;

/// Routes mounted at `/personas`.
///
/// ```text
/// GET    /          -> list_personas
/// POST   /assign    -> preview_assignment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(personas::list_personas))
        .route("/assign", post(personas::preview_assignment))
}
