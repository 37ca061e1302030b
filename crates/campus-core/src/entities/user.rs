//! User entity - identity plus mutable economic state
//!
//! The `coins`/`reputation` fields and the activity counters are only ever
//! mutated through the economy services, never directly by presentation code.

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// A campus Q&A user account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    pub email: String,
    /// Spendable coin balance. Kept non-negative by the storage layer.
    pub coins: i64,
    /// Community standing score. May drift internally but is never shown negative.
    pub reputation: i64,
    pub total_questions: i64,
    pub total_answers: i64,
    pub accepted_answers: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with a zeroed economy state
    pub fn new(id: Snowflake, username: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            email,
            coins: 0,
            reputation: 0,
            total_questions: 0,
            total_answers: 0,
            accepted_answers: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether the balance covers a cost
    #[inline]
    pub fn can_afford(&self, cost: i64) -> bool {
        self.coins >= cost
    }

    /// Reputation as shown to other users (floored at zero)
    #[inline]
    pub fn display_reputation(&self) -> i64 {
        self.reputation.max(0)
    }

    /// Share of this user's answers that were accepted, as a percentage
    pub fn acceptance_rate(&self) -> f64 {
        if self.total_answers == 0 {
            return 0.0;
        }
        (self.accepted_answers as f64 / self.total_answers as f64) * 100.0
    }
}
