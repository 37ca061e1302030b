//! Domain errors - error types for the domain layer
//!
//! Every economy operation returns one of these as a typed result. Business
//! invariant violations are never retried; only the storage/conflict
//! variants are reasonable retry candidates for callers.

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Question not found: {0}")]
    QuestionNotFound(Snowflake),

    #[error("Answer not found: {0}")]
    AnswerNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Rating must be between 0 and 5, got {0}")]
    InvalidRating(i16),

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Too many unevaluated questions: accept an answer on an open question first (limit {limit})")]
    UnevaluatedLimitReached { limit: u32 },

    #[error("Insufficient coins: need {required}, have {balance}")]
    InsufficientCoins { required: i64, balance: i64 },

    #[error("You cannot answer your own question")]
    SelfAnswer,

    #[error("You cannot vote on your own answer")]
    SelfVote,

    #[error("Question {0} already has an accepted answer")]
    AlreadyAnswered(Snowflake),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Vote changed concurrently, retry")]
    VoteConflict,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Get an error code string for presentation-layer responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::QuestionNotFound(_) => "UNKNOWN_QUESTION",
            Self::AnswerNotFound(_) => "UNKNOWN_ANSWER",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidRating(_) => "INVALID_RATING",
            Self::UnevaluatedLimitReached { .. } => "LIMIT_EXCEEDED",
            Self::InsufficientCoins { .. } => "INSUFFICIENT_FUNDS",
            Self::SelfAnswer | Self::SelfVote => "SELF_ACTION",
            Self::AlreadyAnswered(_) => "ALREADY_ANSWERED",
            Self::VoteConflict => "VOTE_CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_) | Self::QuestionNotFound(_) | Self::AnswerNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::InvalidRating(_))
    }

    /// Check if this is a conflict with existing state
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::AlreadyAnswered(_) | Self::VoteConflict)
    }

    /// Only storage failures and vote races are worth retrying; everything
    /// else is a business invariant violation
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Database(_) | Self::VoteConflict)
    }
}
