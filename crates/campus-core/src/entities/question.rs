//! Question entity

use chrono::{DateTime, Duration, Utc};

use crate::value_objects::Snowflake;

/// A posted question
///
/// `coin_reward` is fixed at creation time to the amount the asker paid;
/// it is what the accepted answerer later receives (before bonus/penalty).
/// Once `is_answered` is set the question is terminal for acceptance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: Snowflake,
    pub author_id: Snowflake,
    pub title: String,
    pub description: String,
    pub category: String,
    pub is_urgent: bool,
    pub coin_reward: i64,
    pub is_answered: bool,
    pub accepted_answer_id: Option<Snowflake>,
    pub answer_count: i64,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Question {
    /// Create a new Question; `coin_reward` must equal the cost paid
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Snowflake,
        author_id: Snowflake,
        title: String,
        description: String,
        category: String,
        is_urgent: bool,
        coin_reward: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            author_id,
            title,
            description,
            category,
            is_urgent,
            coin_reward,
            is_answered: false,
            accepted_answer_id: None,
            answer_count: 0,
            view_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// A question with no accepted answer counts against the asker's open cap
    #[inline]
    pub fn is_unevaluated(&self) -> bool {
        self.accepted_answer_id.is_none()
    }

    /// Check whether an answer posted at `answered_at` qualifies for the
    /// urgent double-reward bonus
    pub fn within_urgent_window(&self, answered_at: DateTime<Utc>, window_minutes: i64) -> bool {
        self.is_urgent && answered_at - self.created_at <= Duration::minutes(window_minutes)
    }
}
