//! Answer database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the answers table
#[derive(Debug, Clone, FromRow)]
pub struct AnswerModel {
    pub id: i64,
    pub question_id: i64,
    pub author_id: i64,
    pub content: String,
    pub rating: Option<i16>,
    pub upvotes: i64,
    pub downvotes: i64,
    pub is_accepted: bool,
    pub created_at: DateTime<Utc>,
}
