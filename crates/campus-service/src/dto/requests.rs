//! Request DTOs for the economy services
//!
//! All mutating request DTOs implement `Deserialize`; the ones carrying
//! free text also implement `Validate` for transport-level checks. The
//! services re-validate in business order (first failure wins), so these
//! annotations are a first line of defense, not the authority.

use campus_core::{Snowflake, VoteDirection};
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// User Requests
// ============================================================================

/// Register a new user account
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(length(min = 3, max = 30, message = "Username must be 3-30 characters"))]
    pub username: String,

    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
}

// ============================================================================
// Question Requests
// ============================================================================

/// Post a new question
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PostQuestionRequest {
    #[validate(length(min = 10, max = 200, message = "Title must be 10-200 characters"))]
    pub title: String,

    #[validate(length(min = 20, max = 5000, message = "Description must be 20-5000 characters"))]
    pub description: String,

    #[validate(length(min = 1, max = 50, message = "Category is required"))]
    pub category: String,

    #[serde(default)]
    pub is_urgent: bool,
}

// ============================================================================
// Answer Requests
// ============================================================================

/// Submit an answer to a question
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitAnswerRequest {
    pub question_id: Snowflake,

    #[validate(length(min = 10, max = 5000, message = "Answer must be 10-5000 characters"))]
    pub content: String,
}

/// Vote on an answer
#[derive(Debug, Clone, Deserialize)]
pub struct VoteAnswerRequest {
    pub answer_id: Snowflake,
    pub direction: VoteDirectionParam,
}

/// Wire form of a vote direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirectionParam {
    Up,
    Down,
}

impl From<VoteDirectionParam> for VoteDirection {
    fn from(param: VoteDirectionParam) -> Self {
        match param {
            VoteDirectionParam::Up => VoteDirection::Up,
            VoteDirectionParam::Down => VoteDirection::Down,
        }
    }
}

/// Accept an answer with a 0-5 rating
#[derive(Debug, Clone, Deserialize)]
pub struct AcceptAnswerRequest {
    pub question_id: Snowflake,
    pub answer_id: Snowflake,
    pub rating: i16,
}

// ============================================================================
// Ledger Requests
// ============================================================================

/// Top up a coin balance
#[derive(Debug, Clone, Deserialize)]
pub struct PurchaseCoinsRequest {
    pub amount: i64,
    pub description: Option<String>,
}
