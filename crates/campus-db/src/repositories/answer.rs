//! PostgreSQL implementation of AnswerRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use campus_core::entities::Answer;
use campus_core::traits::{AnswerRepository, RepoResult};
use campus_core::value_objects::Snowflake;

use crate::models::AnswerModel;

use super::error::map_db_error;

const ANSWER_COLUMNS: &str = "id, question_id, author_id, content, rating, upvotes, downvotes, \
     is_accepted, created_at";

/// PostgreSQL implementation of AnswerRepository
#[derive(Clone)]
pub struct PgAnswerRepository {
    pool: PgPool,
}

impl PgAnswerRepository {
    /// Create a new PgAnswerRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnswerRepository for PgAnswerRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Answer>> {
        let result = sqlx::query_as::<_, AnswerModel>(&format!(
            "SELECT {ANSWER_COLUMNS} FROM answers WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Answer::from))
    }

    #[instrument(skip(self))]
    async fn find_by_question(&self, question_id: Snowflake) -> RepoResult<Vec<Answer>> {
        let results = sqlx::query_as::<_, AnswerModel>(&format!(
            "SELECT {ANSWER_COLUMNS} FROM answers WHERE question_id = $1 ORDER BY created_at"
        ))
        .bind(question_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Answer::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_accepted(&self, question_id: Snowflake) -> RepoResult<Option<Answer>> {
        let result = sqlx::query_as::<_, AnswerModel>(&format!(
            "SELECT {ANSWER_COLUMNS} FROM answers WHERE question_id = $1 AND is_accepted = TRUE"
        ))
        .bind(question_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Answer::from))
    }
}
