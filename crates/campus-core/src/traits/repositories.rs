//! Repository traits (ports) - read and single-row access to the store
//!
//! The domain layer defines what it needs; the infrastructure layer
//! provides the implementation. Multi-row economy write-sets live on the
//! separate `EconomyStore` port so each runs as one transaction.

use async_trait::async_trait;

use crate::entities::{Answer, LedgerEntry, Question, User, Vote};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Create a new user
    async fn create(&self, user: &User) -> RepoResult<()>;
}

// ============================================================================
// Question Repository
// ============================================================================

#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Find question by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Question>>;

    /// List questions by author, newest first
    async fn find_by_author(&self, author_id: Snowflake) -> RepoResult<Vec<Question>>;

    /// Count the author's questions that have no accepted answer yet
    async fn unevaluated_count(&self, author_id: Snowflake) -> RepoResult<i64>;

    /// Atomically bump the view counter
    async fn record_view(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Answer Repository
// ============================================================================

#[async_trait]
pub trait AnswerRepository: Send + Sync {
    /// Find answer by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Answer>>;

    /// List answers for a question, oldest first
    async fn find_by_question(&self, question_id: Snowflake) -> RepoResult<Vec<Answer>>;

    /// Find the accepted answer for a question, if any
    async fn find_accepted(&self, question_id: Snowflake) -> RepoResult<Option<Answer>>;
}

// ============================================================================
// Vote Repository
// ============================================================================

#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// Find a voter's vote on an answer; the `(answer_id, user_id)` pair is
    /// unique, so at most one row exists
    async fn find(&self, answer_id: Snowflake, user_id: Snowflake) -> RepoResult<Option<Vote>>;
}

// ============================================================================
// Ledger Repository
// ============================================================================

#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// A user's ledger entries, newest first
    async fn find_by_user(&self, user_id: Snowflake, limit: i64) -> RepoResult<Vec<LedgerEntry>>;

    /// Sum of all positive movements (earned plus purchased)
    async fn total_earned(&self, user_id: Snowflake) -> RepoResult<i64>;

    /// Sum of all negative movements, returned as a positive number
    async fn total_spent(&self, user_id: Snowflake) -> RepoResult<i64>;
}
