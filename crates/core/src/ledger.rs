//! Reputation ledger rules.
//!
//! A voter holds at most one live vote per target. Casting a vote either
//! creates that record, flips its sign, or is rejected. Each accepted
//! transition carries the exact delta to apply to the target's cached
//! `reputation_score`, so storage can apply the vote write and the score
//! adjustment in one transaction.
//!
//! Casting the same value twice is rejected as a duplicate rather than
//! treated as a silent no-op.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Errors raised by ledger rules, independent of storage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("Users cannot vote for themselves")]
    SelfVote,

    #[error("Invalid vote value {0}; expected 1 or -1")]
    InvalidValue(i64),

    #[error("Voter with id {0} not found")]
    VoterNotFound(DbId),

    #[error("Target user with id {0} not found")]
    TargetNotFound(DbId),

    #[error("Vote already recorded with the same value")]
    DuplicateVote,
}

/// A signed unit vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum VoteValue {
    Up,
    Down,
}

impl VoteValue {
    /// Contribution of this vote to a reputation score.
    pub fn delta(self) -> i64 {
        match self {
            VoteValue::Up => 1,
            VoteValue::Down => -1,
        }
    }

    /// Value as stored in the `votes.value` SMALLINT column.
    pub fn as_i16(self) -> i16 {
        match self {
            VoteValue::Up => 1,
            VoteValue::Down => -1,
        }
    }
}

impl TryFrom<i64> for VoteValue {
    type Error = LedgerError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(VoteValue::Up),
            -1 => Ok(VoteValue::Down),
            other => Err(LedgerError::InvalidValue(other)),
        }
    }
}

impl TryFrom<i16> for VoteValue {
    type Error = LedgerError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        VoteValue::try_from(i64::from(value))
    }
}

impl From<VoteValue> for i64 {
    fn from(value: VoteValue) -> Self {
        value.delta()
    }
}

/// An accepted change to a (voter, target) vote record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteTransition {
    /// No prior vote; a new record is created.
    Create { value: VoteValue },
    /// The prior vote had the opposite sign and is replaced.
    Flip { from: VoteValue, to: VoteValue },
}

impl VoteTransition {
    /// Amount to add to the target's reputation score.
    pub fn score_delta(self) -> i64 {
        match self {
            VoteTransition::Create { value } => value.delta(),
            VoteTransition::Flip { from, to } => to.delta() - from.delta(),
        }
    }

    /// Value held by the vote record after the transition.
    pub fn value(self) -> VoteValue {
        match self {
            VoteTransition::Create { value } => value,
            VoteTransition::Flip { to, .. } => to,
        }
    }

    pub fn kind(self) -> &'static str {
        match self {
            VoteTransition::Create { .. } => "created",
            VoteTransition::Flip { .. } => "flipped",
        }
    }
}

/// Reject votes a user casts on their own profile.
pub fn ensure_not_self_vote(voter_id: DbId, target_id: DbId) -> Result<(), LedgerError> {
    if voter_id == target_id {
        return Err(LedgerError::SelfVote);
    }
    Ok(())
}

/// Decide what a vote does given the voter's existing vote on the target.
pub fn plan_vote(
    voter_id: DbId,
    target_id: DbId,
    existing: Option<VoteValue>,
    requested: VoteValue,
) -> Result<VoteTransition, LedgerError> {
    ensure_not_self_vote(voter_id, target_id)?;

    match existing {
        None => Ok(VoteTransition::Create { value: requested }),
        Some(current) if current == requested => Err(LedgerError::DuplicateVote),
        Some(current) => Ok(VoteTransition::Flip {
            from: current,
            to: requested,
        }),
    }
}

/// Up/down counts received by one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct VoteTally {
    pub upvotes: i64,
    pub downvotes: i64,
}

impl VoteTally {
    /// Net score (upvotes minus downvotes).
    pub fn net(&self) -> i64 {
        self.upvotes - self.downvotes
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    /// Minimal in-memory ledger used to check score bookkeeping over
    /// sequences of planned transitions.
    #[derive(Default)]
    struct Book {
        votes: HashMap<(DbId, DbId), VoteValue>,
        scores: HashMap<DbId, i64>,
    }

    impl Book {
        fn cast(
            &mut self,
            voter: DbId,
            target: DbId,
            value: VoteValue,
        ) -> Result<i64, LedgerError> {
            let existing = self.votes.get(&(voter, target)).copied();
            let transition = plan_vote(voter, target, existing, value)?;
            self.votes.insert((voter, target), transition.value());
            let score = self.scores.entry(target).or_insert(0);
            *score += transition.score_delta();
            Ok(*score)
        }

        fn recomputed(&self, target: DbId) -> i64 {
            self.votes
                .iter()
                .filter(|((_, t), _)| *t == target)
                .map(|(_, v)| v.delta())
                .sum()
        }
    }

    // -- VoteValue --

    #[test]
    fn accepts_unit_values() {
        assert_eq!(VoteValue::try_from(1i64), Ok(VoteValue::Up));
        assert_eq!(VoteValue::try_from(-1i64), Ok(VoteValue::Down));
        assert_eq!(VoteValue::try_from(-1i16), Ok(VoteValue::Down));
    }

    #[test]
    fn rejects_other_values() {
        for bad in [0i64, 2, -2, 100] {
            assert_eq!(
                VoteValue::try_from(bad),
                Err(LedgerError::InvalidValue(bad))
            );
        }
    }

    #[test]
    fn deserializes_from_integer() {
        let up: VoteValue = serde_json::from_str("1").unwrap();
        assert_eq!(up, VoteValue::Up);
        assert!(serde_json::from_str::<VoteValue>("0").is_err());
        assert_eq!(serde_json::to_string(&VoteValue::Down).unwrap(), "-1");
    }

    // -- plan_vote --

    #[test]
    fn first_vote_creates_record() {
        let t = plan_vote(1, 2, None, VoteValue::Up).unwrap();
        assert_eq!(t.kind(), "created");
        assert_eq!(t.value(), VoteValue::Up);
        assert_eq!(t.score_delta(), 1);

        let t = plan_vote(1, 2, None, VoteValue::Down).unwrap();
        assert_eq!(t.score_delta(), -1);
    }

    #[test]
    fn flip_up_to_down_moves_score_by_minus_two() {
        let t = plan_vote(1, 2, Some(VoteValue::Up), VoteValue::Down).unwrap();
        assert_eq!(t.kind(), "flipped");
        assert_eq!(t.score_delta(), -2);
        assert_eq!(t.value(), VoteValue::Down);
    }

    #[test]
    fn flip_down_to_up_moves_score_by_plus_two() {
        let t = plan_vote(1, 2, Some(VoteValue::Down), VoteValue::Up).unwrap();
        assert_eq!(t.score_delta(), 2);
    }

    #[test]
    fn repeated_value_is_duplicate() {
        assert_eq!(
            plan_vote(1, 2, Some(VoteValue::Up), VoteValue::Up),
            Err(LedgerError::DuplicateVote)
        );
        assert_eq!(
            plan_vote(1, 2, Some(VoteValue::Down), VoteValue::Down),
            Err(LedgerError::DuplicateVote)
        );
    }

    #[test]
    fn self_vote_rejected_regardless_of_state() {
        for existing in [None, Some(VoteValue::Up), Some(VoteValue::Down)] {
            assert_eq!(
                plan_vote(7, 7, existing, VoteValue::Up),
                Err(LedgerError::SelfVote)
            );
        }
    }

    // -- bookkeeping --

    #[test]
    fn documented_score_sequence() {
        let mut book = Book::default();
        assert_eq!(book.cast(1, 9, VoteValue::Up), Ok(1));
        assert_eq!(book.cast(2, 9, VoteValue::Up), Ok(2));
        assert_eq!(book.cast(1, 9, VoteValue::Down), Ok(0));
        assert_eq!(book.recomputed(9), 0);
    }

    #[test]
    fn duplicates_never_move_score() {
        let mut book = Book::default();
        book.cast(1, 9, VoteValue::Up).unwrap();
        for _ in 0..100 {
            assert_eq!(
                book.cast(1, 9, VoteValue::Up),
                Err(LedgerError::DuplicateVote)
            );
        }
        assert_eq!(book.scores[&9], 1);
        assert_eq!(book.votes.len(), 1);
    }

    #[test]
    fn cached_score_matches_vote_sum() {
        let mut book = Book::default();
        let casts = [
            (1, 9, VoteValue::Up),
            (2, 9, VoteValue::Down),
            (3, 9, VoteValue::Up),
            (2, 9, VoteValue::Up),
            (4, 9, VoteValue::Down),
            (1, 9, VoteValue::Down),
            (3, 8, VoteValue::Up),
        ];
        for (voter, target, value) in casts {
            book.cast(voter, target, value).unwrap();
        }
        assert_eq!(book.scores[&9], book.recomputed(9));
        assert_eq!(book.scores[&8], book.recomputed(8));
        assert_eq!(book.scores[&9], 0);
    }

    #[test]
    fn tally_net() {
        let tally = VoteTally {
            upvotes: 3,
            downvotes: 1,
        };
        assert_eq!(tally.net(), 2);
        assert_eq!(VoteTally::default().net(), 0);
    }
}
