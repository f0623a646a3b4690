//! Repository for the `votes` table and the reputation ledger transaction.

use sqlx::PgPool;
use xeno_core::ledger::{
    ensure_not_self_vote, plan_vote, LedgerError, VoteTally, VoteTransition, VoteValue,
};
use xeno_core::types::DbId;

use crate::models::vote::{Vote, VoteOutcome};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, voter_id, target_id, value, created_at, updated_at";

/// Failure of a vote cast: a ledger rule or the storage layer.
///
/// On any error the transaction is rolled back, so neither the vote row nor
/// the target's score has changed.
#[derive(Debug, thiserror::Error)]
pub enum VoteError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("Vote persistence failed: {0}")]
    Persistence(#[from] sqlx::Error),
}

/// Provides the ledger write path and vote queries.
pub struct VoteRepo;

impl VoteRepo {
    /// Cast or flip a vote and adjust the target's score in one transaction.
    ///
    /// The target row is locked `FOR NO KEY UPDATE` before the existing vote
    /// is read, so all votes toward one target serialize on that lock while
    /// foreign-key checks from other transactions are not blocked.
    pub async fn cast_vote(
        pool: &PgPool,
        voter_id: DbId,
        target_id: DbId,
        value: VoteValue,
    ) -> Result<VoteOutcome, VoteError> {
        ensure_not_self_vote(voter_id, target_id)?;

        let mut tx = pool.begin().await?;

        let target: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM users WHERE id = $1 FOR NO KEY UPDATE")
                .bind(target_id)
                .fetch_optional(&mut *tx)
                .await?;
        if target.is_none() {
            return Err(LedgerError::TargetNotFound(target_id).into());
        }

        let (voter_exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
                .bind(voter_id)
                .fetch_one(&mut *tx)
                .await?;
        if !voter_exists {
            return Err(LedgerError::VoterNotFound(voter_id).into());
        }

        let existing: Option<(i16,)> =
            sqlx::query_as("SELECT value FROM votes WHERE voter_id = $1 AND target_id = $2")
                .bind(voter_id)
                .bind(target_id)
                .fetch_optional(&mut *tx)
                .await?;
        let existing = existing.map(|(v,)| VoteValue::try_from(v)).transpose()?;

        let transition = plan_vote(voter_id, target_id, existing, value)?;

        let vote_query = match transition {
            VoteTransition::Create { .. } => format!(
                "INSERT INTO votes (voter_id, target_id, value) \
                 VALUES ($1, $2, $3) \
                 RETURNING {COLUMNS}"
            ),
            VoteTransition::Flip { .. } => format!(
                "UPDATE votes SET value = $3 \
                 WHERE voter_id = $1 AND target_id = $2 \
                 RETURNING {COLUMNS}"
            ),
        };
        let vote = sqlx::query_as::<_, Vote>(&vote_query)
            .bind(voter_id)
            .bind(target_id)
            .bind(transition.value().as_i16())
            .fetch_one(&mut *tx)
            .await?;

        let score_delta = transition.score_delta();
        let (target_score,): (i64,) = sqlx::query_as(
            "UPDATE users SET reputation_score = reputation_score + $2 \
             WHERE id = $1 \
             RETURNING reputation_score",
        )
        .bind(target_id)
        .bind(score_delta)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(
            voter_id,
            target_id,
            transition = transition.kind(),
            score_delta,
            target_score,
            "Vote committed",
        );

        Ok(VoteOutcome {
            vote,
            transition: transition.kind(),
            score_delta,
            target_score,
        })
    }

    /// The voter's current vote on a target, if any.
    pub async fn find(
        pool: &PgPool,
        voter_id: DbId,
        target_id: DbId,
    ) -> Result<Option<Vote>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM votes WHERE voter_id = $1 AND target_id = $2");
        sqlx::query_as::<_, Vote>(&query)
            .bind(voter_id)
            .bind(target_id)
            .fetch_optional(pool)
            .await
    }

    /// Up/down counts of votes received by a user.
    pub async fn tally_for_target(
        pool: &PgPool,
        target_id: DbId,
    ) -> Result<VoteTally, sqlx::Error> {
        let (upvotes, downvotes): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*) FILTER (WHERE value = 1), \
                    COUNT(*) FILTER (WHERE value = -1) \
             FROM votes WHERE target_id = $1",
        )
        .bind(target_id)
        .fetch_one(pool)
        .await?;
        Ok(VoteTally { upvotes, downvotes })
    }

    /// Rewrite a user's cached score from its vote rows.
    ///
    /// Repair path for rows edited outside the ledger. Returns `None` if the
    /// user does not exist.
    pub async fn recompute_score(
        pool: &PgPool,
        target_id: DbId,
    ) -> Result<Option<i64>, sqlx::Error> {
        let row: Option<(i64,)> = sqlx::query_as(
            "UPDATE users SET reputation_score = \
                 (SELECT COALESCE(SUM(value), 0)::BIGINT FROM votes WHERE target_id = $1) \
             WHERE id = $1 \
             RETURNING reputation_score",
        )
        .bind(target_id)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|(score,)| score))
    }
}
