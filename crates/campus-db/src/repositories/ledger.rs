//! PostgreSQL implementation of LedgerRepository
//!
//! The ledger is append-only; this repository only reads. Inserts happen
//! exclusively inside `PgEconomyStore` transactions.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use campus_core::entities::LedgerEntry;
use campus_core::traits::{LedgerRepository, RepoResult};
use campus_core::value_objects::Snowflake;

use crate::models::LedgerEntryModel;

use super::error::map_db_error;

/// PostgreSQL implementation of LedgerRepository
#[derive(Clone)]
pub struct PgLedgerRepository {
    pool: PgPool,
}

impl PgLedgerRepository {
    /// Create a new PgLedgerRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LedgerRepository for PgLedgerRepository {
    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake, limit: i64) -> RepoResult<Vec<LedgerEntry>> {
        let limit = limit.clamp(1, 100);

        let results = sqlx::query_as::<_, LedgerEntryModel>(
            r#"
            SELECT id, user_id, amount, kind, description, balance_after,
                   reference_id, reference_type, created_at
            FROM ledger_entries
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id.into_inner())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(LedgerEntry::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn total_earned(&self, user_id: Snowflake) -> RepoResult<i64> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COALESCE(SUM(amount), 0)::BIGINT
            FROM ledger_entries
            WHERE user_id = $1 AND amount > 0
            "#,
        )
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(total)
    }

    #[instrument(skip(self))]
    async fn total_spent(&self, user_id: Snowflake) -> RepoResult<i64> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COALESCE(-SUM(amount), 0)::BIGINT
            FROM ledger_entries
            WHERE user_id = $1 AND amount < 0
            "#,
        )
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(total)
    }
}
