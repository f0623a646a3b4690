//! Repository for the `users` table.

use sqlx::{FromRow, PgPool};
use xeno_core::paging::{clamp_limit, clamp_offset, MAX_PAGE_LIMIT};
use xeno_core::persona::RankClass;
use xeno_core::types::DbId;

use crate::models::user::{LeaderboardEntry, UpsertProfile, User, UserSummary, DEFAULT_AVATAR_URL};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, handle, display_name, avatar_url, follower_count, post_count, \
                       persona_name, persona_rank, persona_archetype, persona_ability, \
                       persona_flavor, reputation_score, created_at, updated_at";

const SUMMARY_COLUMNS: &str = "id, handle, avatar_url, persona_name, persona_rank";

const LEADERBOARD_COLUMNS: &str = "id, handle, display_name, avatar_url, persona_name, \
                                   persona_rank, follower_count, reputation_score";

/// Upsert result row: the user plus whether the statement inserted it.
#[derive(FromRow)]
struct UpsertRow {
    #[sqlx(flatten)]
    user: User,
    inserted: bool,
}

/// `CASE` expression mapping `persona_rank` to its sort priority.
fn rank_priority_sql() -> String {
    let arms: String = RankClass::ALL
        .iter()
        .map(|rank| format!("WHEN '{}' THEN {} ", rank.as_str(), rank.priority()))
        .collect();
    format!("CASE persona_rank {arms}ELSE 0 END")
}

/// Provides directory operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by handle (case-sensitive).
    pub async fn find_by_handle(pool: &PgPool, handle: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE handle = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(handle)
            .fetch_optional(pool)
            .await
    }

    /// Insert a profile, or refresh metrics and persona of an existing one.
    ///
    /// The reputation score is never touched here; only the ledger moves it.
    /// Returns the row and `true` when it was newly created.
    pub async fn upsert_profile(
        pool: &PgPool,
        input: &UpsertProfile,
    ) -> Result<(User, bool), sqlx::Error> {
        let query = format!(
            "INSERT INTO users (handle, display_name, avatar_url, follower_count, post_count, \
                                persona_name, persona_rank, persona_archetype, persona_ability, \
                                persona_flavor) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             ON CONFLICT (handle) DO UPDATE SET \
                 display_name = EXCLUDED.display_name, \
                 avatar_url = EXCLUDED.avatar_url, \
                 follower_count = EXCLUDED.follower_count, \
                 post_count = EXCLUDED.post_count, \
                 persona_name = EXCLUDED.persona_name, \
                 persona_rank = EXCLUDED.persona_rank, \
                 persona_archetype = EXCLUDED.persona_archetype, \
                 persona_ability = EXCLUDED.persona_ability, \
                 persona_flavor = EXCLUDED.persona_flavor \
             RETURNING {COLUMNS}, (xmax = 0) AS inserted"
        );
        let avatar_url = input
            .avatar_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(DEFAULT_AVATAR_URL);

        let row = sqlx::query_as::<_, UpsertRow>(&query)
            .bind(&input.handle)
            .bind(&input.display_name)
            .bind(avatar_url)
            .bind(input.follower_count)
            .bind(input.post_count)
            .bind(&input.persona.name)
            .bind(input.persona.rank_class.as_str())
            .bind(&input.persona.archetype)
            .bind(&input.persona.special_ability)
            .bind(&input.persona.flavor_text)
            .fetch_one(pool)
            .await?;
        Ok((row.user, row.inserted))
    }

    /// List all users, oldest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<UserSummary>, sqlx::Error> {
        let query = format!("SELECT {SUMMARY_COLUMNS} FROM users ORDER BY id");
        sqlx::query_as::<_, UserSummary>(&query)
            .fetch_all(pool)
            .await
    }

    /// Ranked users: persona rank first, then reputation, then id.
    ///
    /// `search` filters by case-insensitive handle substring. Without a
    /// `limit` every matching user is returned.
    pub async fn leaderboard(
        pool: &PgPool,
        search: Option<&str>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<LeaderboardEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {LEADERBOARD_COLUMNS} FROM users \
             WHERE ($1::TEXT IS NULL OR strpos(lower(handle), lower($1)) > 0) \
             ORDER BY {} DESC, reputation_score DESC, id ASC \
             LIMIT $2 OFFSET $3",
            rank_priority_sql()
        );
        let search = search.map(str::trim).filter(|s| !s.is_empty());

        sqlx::query_as::<_, LeaderboardEntry>(&query)
            .bind(search)
            .bind(clamp_limit(limit, MAX_PAGE_LIMIT))
            .bind(clamp_offset(offset))
            .fetch_all(pool)
            .await
    }
}
