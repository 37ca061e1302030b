//! Answer entity

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// An answer to a question
///
/// `rating` is set once, at acceptance time. The vote counters are kept
/// non-negative by guarded decrements in the storage layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub id: Snowflake,
    pub question_id: Snowflake,
    pub author_id: Snowflake,
    pub content: String,
    /// 0-5 star rating assigned by the asker when accepting, None until then
    pub rating: Option<i16>,
    pub upvotes: i64,
    pub downvotes: i64,
    pub is_accepted: bool,
    pub created_at: DateTime<Utc>,
}

impl Answer {
    /// Create a new Answer
    pub fn new(id: Snowflake, question_id: Snowflake, author_id: Snowflake, content: String) -> Self {
        Self {
            id,
            question_id,
            author_id,
            content,
            rating: None,
            upvotes: 0,
            downvotes: 0,
            is_accepted: false,
            created_at: Utc::now(),
        }
    }

    /// Net community score for display ordering
    #[inline]
    pub fn score(&self) -> i64 {
        self.upvotes - self.downvotes
    }
}
