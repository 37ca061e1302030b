//! Question database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the questions table
#[derive(Debug, Clone, FromRow)]
pub struct QuestionModel {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub is_urgent: bool,
    pub coin_reward: i64,
    pub is_answered: bool,
    pub accepted_answer_id: Option<i64>,
    pub answer_count: i64,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
