pub mod health;
pub mod leaderboard;
pub mod personas;
pub mod profiles;
pub mod users;
pub mod votes;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /profiles                      submit handle (POST)
/// /profiles/{handle}             get by handle
///
/// /users                         list
/// /users/{id}                    profile card
/// /users/{id}/votes/summary      up/down/net counts
///
/// /leaderboard                   ranked, searchable, paged
///
/// /personas                      catalog grouped by rank
/// /personas/assign               assignment preview (POST)
///
/// /votes                         cast or flip (POST, auth)
/// /votes/{target_id}             caller's vote on a target (auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/profiles", profiles::router())
        .nest("/users", users::router())
        .nest("/leaderboard", leaderboard::router())
        .nest("/personas", personas::router())
        .nest("/votes", votes::router())
}
