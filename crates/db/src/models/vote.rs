//! Vote model and ledger outcome types.

use serde::Serialize;
use sqlx::FromRow;
use xeno_core::types::{DbId, Timestamp};

/// A row from the `votes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Vote {
    pub id: DbId,
    pub voter_id: DbId,
    pub target_id: DbId,
    pub value: i16,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Result of a committed vote transaction.
#[derive(Debug, Clone, Serialize)]
pub struct VoteOutcome {
    pub vote: Vote,
    /// `"created"` or `"flipped"`.
    pub transition: &'static str,
    pub score_delta: i64,
    /// Target's reputation score after the commit.
    pub target_score: i64,
}
