//! Transactional economy port and the notification port
//!
//! Each `EconomyStore` method is one complete economy write-set and must
//! execute as a single atomic transaction: it applies every write or none.
//! Balance and counter mutations are expressed relative to the stored value
//! (guarded SQL increments or equivalent), never as a stale
//! read-modify-write, so concurrent operations on the same user cannot
//! lose updates.

use async_trait::async_trait;

use crate::entities::{
    Answer, LedgerEntry, NewLedgerEntry, NotificationIntent, Question, Vote, VoteTransition,
};
use crate::value_objects::Snowflake;

use super::repositories::RepoResult;

/// Reputation credit applied to a user inside a vote transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReputationGrant {
    pub user_id: Snowflake,
    pub amount: i64,
}

/// Everything `commit_acceptance` writes, precomputed by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceptanceGrant {
    pub question_id: Snowflake,
    pub answer_id: Snowflake,
    /// Author of the accepted answer, who receives the reward
    pub answerer_id: Snowflake,
    pub rating: i16,
    pub coins: i64,
    pub reputation: i64,
}

/// Transactional writes for the economy engine
#[async_trait]
pub trait EconomyStore: Send + Sync {
    /// Commit a successful question post: insert the question, debit the
    /// author (guarded so the balance cannot go negative), bump
    /// `total_questions`, and append the SPEND ledger entry.
    ///
    /// Fails with `InsufficientCoins` if the guarded debit matches no row,
    /// which also closes the check/debit race.
    async fn commit_question_post(
        &self,
        question: &Question,
        entry: NewLedgerEntry,
    ) -> RepoResult<LedgerEntry>;

    /// Commit an answer submission: insert the answer, bump the question's
    /// `answer_count`, and the author's `total_answers`.
    async fn commit_answer_submission(&self, answer: &Answer) -> RepoResult<()>;

    /// Commit one vote state transition: mutate the vote row per the
    /// transition, adjust the answer counters (decrements guarded at zero),
    /// and apply the reputation grant if present.
    ///
    /// Fails with `VoteConflict` when a concurrent transition already
    /// changed the `(answer_id, user_id)` row.
    async fn commit_vote_transition(
        &self,
        vote: &Vote,
        transition: VoteTransition,
        reputation: Option<ReputationGrant>,
    ) -> RepoResult<()>;

    /// Commit an acceptance: flip the question to answered (conditionally,
    /// so exactly one accept per question can ever succeed), mark the
    /// answer accepted with its rating, un-mark any other accepted answer,
    /// credit the answerer, and append the EARN ledger entry.
    ///
    /// Fails with `AlreadyAnswered` when the question was already terminal.
    async fn commit_acceptance(
        &self,
        grant: &AcceptanceGrant,
        entry: NewLedgerEntry,
    ) -> RepoResult<LedgerEntry>;

    /// Commit a coin top-up: credit the user and append the PURCHASE entry.
    async fn commit_purchase(&self, entry: NewLedgerEntry) -> RepoResult<LedgerEntry>;
}

/// Outbound port for notification intents
///
/// The engine emits intents; delivery and read tracking are external.
/// Services treat delivery as fire-and-forget: a failed delivery is logged
/// and never rolls back the economy transaction that produced it.
#[async_trait]
pub trait NotificationPort: Send + Sync {
    /// Hand one intent to the delivery subsystem
    async fn deliver(&self, intent: NotificationIntent) -> RepoResult<()>;
}
