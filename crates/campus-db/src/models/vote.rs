//! Vote database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the votes table
///
/// The table has a unique constraint on `(answer_id, user_id)`; `direction`
/// is stored as +1 (up) or -1 (down).
#[derive(Debug, Clone, FromRow)]
pub struct VoteModel {
    pub answer_id: i64,
    pub user_id: i64,
    pub direction: i16,
    pub created_at: DateTime<Utc>,
}
