//! Response DTOs for the economy services
//!
//! Snowflake identifiers serialize as strings so that JavaScript clients
//! never lose precision on 64-bit values.

use campus_core::Snowflake;
use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// User Responses
// ============================================================================

/// A user's public profile and economy standing
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Snowflake,
    pub username: String,
    pub coins: i64,
    pub reputation: i64,
    pub total_questions: i64,
    pub total_answers: i64,
    pub accepted_answers: i64,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Question Responses
// ============================================================================

/// A question with its economy state
#[derive(Debug, Clone, Serialize)]
pub struct QuestionResponse {
    pub id: Snowflake,
    pub author_id: Snowflake,
    pub title: String,
    pub description: String,
    pub category: String,
    pub coin_reward: i64,
    pub is_urgent: bool,
    pub is_answered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_answer_id: Option<Snowflake>,
    pub answer_count: i64,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Answer Responses
// ============================================================================

/// An answer with its vote tallies
#[derive(Debug, Clone, Serialize)]
pub struct AnswerResponse {
    pub id: Snowflake,
    pub question_id: Snowflake,
    pub author_id: Snowflake,
    pub content: String,
    pub upvotes: i64,
    pub downvotes: i64,
    pub score: i64,
    pub is_accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i16>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Ledger Responses
// ============================================================================

/// One append-only ledger row
#[derive(Debug, Clone, Serialize)]
pub struct LedgerEntryResponse {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub kind: String,
    pub amount: i64,
    pub balance_after: i64,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<Snowflake>,
    pub created_at: DateTime<Utc>,
}

/// Aggregate coin position for one user
#[derive(Debug, Clone, Serialize)]
pub struct CoinSummaryResponse {
    pub user_id: Snowflake,
    pub balance: i64,
    pub total_earned: i64,
    pub total_spent: i64,
}
