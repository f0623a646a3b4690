//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Leaderboard filter and pagination (`?search=&limit=&offset=`).
///
/// Limit and offset are clamped in the repository layer via
/// `clamp_limit` / `clamp_offset`. No `limit` means the full ranking.
#[derive(Debug, Default, Deserialize)]
pub struct LeaderboardParams {
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
