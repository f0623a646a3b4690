//! Directory user model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use xeno_core::persona::{Persona, RankClass};
use xeno_core::types::{DbId, Timestamp};

/// Avatar stored when the profile source provides none.
pub const DEFAULT_AVATAR_URL: &str = "/default-avatar.png";

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub handle: String,
    pub display_name: Option<String>,
    pub avatar_url: String,
    pub follower_count: i64,
    pub post_count: i64,
    pub persona_name: String,
    pub persona_rank: String,
    pub persona_archetype: String,
    pub persona_ability: String,
    pub persona_flavor: String,
    pub reputation_score: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// Rank of the stored persona. The column is constrained to the four
    /// known values, so an unparsable value can only come from manual edits
    /// and is read as common.
    pub fn rank_class(&self) -> RankClass {
        self.persona_rank.parse().unwrap_or(RankClass::Common)
    }

    /// The persona embedded in this row.
    pub fn persona(&self) -> Persona {
        Persona {
            name: self.persona_name.clone(),
            rank_class: self.rank_class(),
            archetype: self.persona_archetype.clone(),
            special_ability: self.persona_ability.clone(),
            flavor_text: self.persona_flavor.clone(),
        }
    }
}

/// Compact listing row for `/users`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserSummary {
    pub id: DbId,
    pub handle: String,
    pub avatar_url: String,
    pub persona_name: String,
    pub persona_rank: String,
}

/// One row of the leaderboard.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LeaderboardEntry {
    pub id: DbId,
    pub handle: String,
    pub display_name: Option<String>,
    pub avatar_url: String,
    pub persona_name: String,
    pub persona_rank: String,
    pub follower_count: i64,
    pub reputation_score: i64,
}

/// Input for inserting or refreshing a profile by handle.
///
/// Metrics and persona are written together so the stored rank always
/// reflects the stored metrics.
#[derive(Debug, Clone)]
pub struct UpsertProfile {
    pub handle: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub follower_count: i64,
    pub post_count: i64,
    pub persona: Persona,
}
