//! PostgreSQL implementation of QuestionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use campus_core::entities::Question;
use campus_core::traits::{QuestionRepository, RepoResult};
use campus_core::value_objects::Snowflake;

use crate::models::QuestionModel;

use super::error::{map_db_error, question_not_found};

const QUESTION_COLUMNS: &str = "id, author_id, title, description, category, is_urgent, \
     coin_reward, is_answered, accepted_answer_id, answer_count, view_count, \
     created_at, updated_at";

/// PostgreSQL implementation of QuestionRepository
#[derive(Clone)]
pub struct PgQuestionRepository {
    pool: PgPool,
}

impl PgQuestionRepository {
    /// Create a new PgQuestionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuestionRepository for PgQuestionRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Question>> {
        let result = sqlx::query_as::<_, QuestionModel>(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Question::from))
    }

    #[instrument(skip(self))]
    async fn find_by_author(&self, author_id: Snowflake) -> RepoResult<Vec<Question>> {
        let results = sqlx::query_as::<_, QuestionModel>(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions WHERE author_id = $1 ORDER BY created_at DESC"
        ))
        .bind(author_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Question::from).collect())
    }

    #[instrument(skip(self))]
    async fn unevaluated_count(&self, author_id: Snowflake) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM questions
            WHERE author_id = $1 AND accepted_answer_id IS NULL
            "#,
        )
        .bind(author_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }

    #[instrument(skip(self))]
    async fn record_view(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE questions SET view_count = view_count + 1 WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(question_not_found(id));
        }

        Ok(())
    }
}
