//! PostgreSQL implementation of the transactional EconomyStore port
//!
//! Each method runs one economy write-set in a single transaction. Balance
//! and counter changes are expressed as guarded relative updates so that
//! concurrent operations against the same rows serialize on row locks and
//! cannot lose updates or drive values negative:
//!
//! - debits match only when `coins + delta >= 0` (zero rows = insufficient
//!   funds, which also closes the check/debit race)
//! - the acceptance flip matches only when `is_answered = FALSE` (zero rows
//!   = a concurrent accept won)
//! - vote rows are claimed through the `(answer_id, user_id)` unique key
//!   (zero rows = a concurrent transition won)

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use campus_core::entities::{
    Answer, LedgerEntry, NewLedgerEntry, Question, Vote, VoteDirection, VoteTransition,
};
use campus_core::error::DomainError;
use campus_core::traits::{AcceptanceGrant, EconomyStore, RepoResult, ReputationGrant};
use campus_core::value_objects::Snowflake;

use super::error::{answer_not_found, map_db_error, question_not_found, user_not_found};

/// PostgreSQL implementation of EconomyStore
#[derive(Clone)]
pub struct PgEconomyStore {
    pool: PgPool,
}

impl PgEconomyStore {
    /// Create a new PgEconomyStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply a signed coin delta to a user inside `tx`, returning the new
    /// balance. The guard keeps the balance non-negative; `extra_set` lets
    /// callers fold counter bumps into the same UPDATE.
    async fn adjust_coins(
        tx: &mut Transaction<'_, Postgres>,
        user_id: Snowflake,
        delta: i64,
        extra_set: &str,
    ) -> RepoResult<i64> {
        let sql = format!(
            "UPDATE users SET coins = coins + $2{extra_set}, updated_at = NOW() \
             WHERE id = $1 AND coins + $2 >= 0 RETURNING coins"
        );

        let balance = sqlx::query_scalar::<_, i64>(&sql)
            .bind(user_id.into_inner())
            .bind(delta)
            .fetch_optional(&mut **tx)
            .await
            .map_err(map_db_error)?;

        match balance {
            Some(balance) => Ok(balance),
            None => {
                // Distinguish a missing user from a failed guard
                let current = sqlx::query_scalar::<_, i64>("SELECT coins FROM users WHERE id = $1")
                    .bind(user_id.into_inner())
                    .fetch_optional(&mut **tx)
                    .await
                    .map_err(map_db_error)?;

                match current {
                    Some(balance) => Err(DomainError::InsufficientCoins {
                        required: -delta,
                        balance,
                    }),
                    None => Err(user_not_found(user_id)),
                }
            }
        }
    }

    /// Append a finalized ledger entry inside `tx`
    async fn insert_ledger_entry(
        tx: &mut Transaction<'_, Postgres>,
        entry: &LedgerEntry,
    ) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO ledger_entries (id, user_id, amount, kind, description,
                                        balance_after, reference_id, reference_type, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(entry.id.into_inner())
        .bind(entry.user_id.into_inner())
        .bind(entry.amount)
        .bind(entry.kind.as_str())
        .bind(&entry.description)
        .bind(entry.balance_after)
        .bind(entry.reference_id.map(Snowflake::into_inner))
        .bind(entry.reference_type.map(|t| t.as_str()))
        .bind(entry.created_at)
        .execute(&mut **tx)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}

#[async_trait]
impl EconomyStore for PgEconomyStore {
    #[instrument(skip(self, question, entry), fields(question_id = %question.id))]
    async fn commit_question_post(
        &self,
        question: &Question,
        entry: NewLedgerEntry,
    ) -> RepoResult<LedgerEntry> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let balance = Self::adjust_coins(
            &mut tx,
            question.author_id,
            entry.amount,
            ", total_questions = total_questions + 1",
        )
        .await?;

        sqlx::query(
            r#"
            INSERT INTO questions (id, author_id, title, description, category, is_urgent,
                                   coin_reward, is_answered, accepted_answer_id,
                                   answer_count, view_count, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(question.id.into_inner())
        .bind(question.author_id.into_inner())
        .bind(&question.title)
        .bind(&question.description)
        .bind(&question.category)
        .bind(question.is_urgent)
        .bind(question.coin_reward)
        .bind(question.is_answered)
        .bind(question.accepted_answer_id.map(Snowflake::into_inner))
        .bind(question.answer_count)
        .bind(question.view_count)
        .bind(question.created_at)
        .bind(question.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let entry = entry.into_entry(balance);
        Self::insert_ledger_entry(&mut tx, &entry).await?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(entry)
    }

    #[instrument(skip(self, answer), fields(answer_id = %answer.id))]
    async fn commit_answer_submission(&self, answer: &Answer) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r#"
            INSERT INTO answers (id, question_id, author_id, content, rating,
                                 upvotes, downvotes, is_accepted, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(answer.id.into_inner())
        .bind(answer.question_id.into_inner())
        .bind(answer.author_id.into_inner())
        .bind(&answer.content)
        .bind(answer.rating)
        .bind(answer.upvotes)
        .bind(answer.downvotes)
        .bind(answer.is_accepted)
        .bind(answer.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let result = sqlx::query(
            r#"
            UPDATE questions
            SET answer_count = answer_count + 1, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(answer.question_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(question_not_found(answer.question_id));
        }

        let result = sqlx::query(
            r#"
            UPDATE users
            SET total_answers = total_answers + 1, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(answer.author_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(answer.author_id));
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, vote), fields(answer_id = %vote.answer_id, voter_id = %vote.user_id))]
    async fn commit_vote_transition(
        &self,
        vote: &Vote,
        transition: VoteTransition,
        reputation: Option<ReputationGrant>,
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        match transition {
            VoteTransition::Cast(direction) => {
                let result = sqlx::query(
                    r#"
                    INSERT INTO votes (answer_id, user_id, direction, created_at)
                    VALUES ($1, $2, $3, $4)
                    ON CONFLICT (answer_id, user_id) DO NOTHING
                    "#,
                )
                .bind(vote.answer_id.into_inner())
                .bind(vote.user_id.into_inner())
                .bind(direction.value())
                .bind(vote.created_at)
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;

                if result.rows_affected() == 0 {
                    return Err(DomainError::VoteConflict);
                }

                let sql = match direction {
                    VoteDirection::Up => "UPDATE answers SET upvotes = upvotes + 1 WHERE id = $1",
                    VoteDirection::Down => {
                        "UPDATE answers SET downvotes = downvotes + 1 WHERE id = $1"
                    }
                };
                let result = sqlx::query(sql)
                    .bind(vote.answer_id.into_inner())
                    .execute(&mut *tx)
                    .await
                    .map_err(map_db_error)?;

                if result.rows_affected() == 0 {
                    return Err(answer_not_found(vote.answer_id));
                }
            }

            VoteTransition::Retract(direction) => {
                let result = sqlx::query(
                    r#"
                    DELETE FROM votes
                    WHERE answer_id = $1 AND user_id = $2 AND direction = $3
                    "#,
                )
                .bind(vote.answer_id.into_inner())
                .bind(vote.user_id.into_inner())
                .bind(direction.value())
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;

                if result.rows_affected() == 0 {
                    return Err(DomainError::VoteConflict);
                }

                // Guarded decrement: a race can never push a counter below zero
                let sql = match direction {
                    VoteDirection::Up => {
                        "UPDATE answers SET upvotes = upvotes - 1 WHERE id = $1 AND upvotes > 0"
                    }
                    VoteDirection::Down => {
                        "UPDATE answers SET downvotes = downvotes - 1 WHERE id = $1 AND downvotes > 0"
                    }
                };
                sqlx::query(sql)
                    .bind(vote.answer_id.into_inner())
                    .execute(&mut *tx)
                    .await
                    .map_err(map_db_error)?;
            }

            VoteTransition::Switch { from, to } => {
                let result = sqlx::query(
                    r#"
                    UPDATE votes SET direction = $3
                    WHERE answer_id = $1 AND user_id = $2 AND direction = $4
                    "#,
                )
                .bind(vote.answer_id.into_inner())
                .bind(vote.user_id.into_inner())
                .bind(to.value())
                .bind(from.value())
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;

                if result.rows_affected() == 0 {
                    return Err(DomainError::VoteConflict);
                }

                // Move one counter to the other in a single statement
                let sql = match from {
                    VoteDirection::Up => {
                        "UPDATE answers SET upvotes = GREATEST(upvotes - 1, 0), \
                         downvotes = downvotes + 1 WHERE id = $1"
                    }
                    VoteDirection::Down => {
                        "UPDATE answers SET downvotes = GREATEST(downvotes - 1, 0), \
                         upvotes = upvotes + 1 WHERE id = $1"
                    }
                };
                let result = sqlx::query(sql)
                    .bind(vote.answer_id.into_inner())
                    .execute(&mut *tx)
                    .await
                    .map_err(map_db_error)?;

                if result.rows_affected() == 0 {
                    return Err(answer_not_found(vote.answer_id));
                }
            }
        }

        if let Some(grant) = reputation {
            let result = sqlx::query(
                r#"
                UPDATE users
                SET reputation = reputation + $2, updated_at = NOW()
                WHERE id = $1
                "#,
            )
            .bind(grant.user_id.into_inner())
            .bind(grant.amount)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

            if result.rows_affected() == 0 {
                return Err(user_not_found(grant.user_id));
            }
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, grant, entry), fields(question_id = %grant.question_id, answer_id = %grant.answer_id))]
    async fn commit_acceptance(
        &self,
        grant: &AcceptanceGrant,
        entry: NewLedgerEntry,
    ) -> RepoResult<LedgerEntry> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Claim the terminal state; only one accept per question can win this
        let result = sqlx::query(
            r#"
            UPDATE questions
            SET is_answered = TRUE, accepted_answer_id = $2, updated_at = NOW()
            WHERE id = $1 AND is_answered = FALSE
            "#,
        )
        .bind(grant.question_id.into_inner())
        .bind(grant.answer_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            let existing = sqlx::query_scalar::<_, bool>(
                "SELECT is_answered FROM questions WHERE id = $1",
            )
            .bind(grant.question_id.into_inner())
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_db_error)?;

            return Err(match existing {
                Some(_) => DomainError::AlreadyAnswered(grant.question_id),
                None => question_not_found(grant.question_id),
            });
        }

        // Uniqueness of the accepted flag should already hold; clear any
        // stray rows before setting the winner
        sqlx::query(
            r#"
            UPDATE answers SET is_accepted = FALSE
            WHERE question_id = $1 AND is_accepted = TRUE AND id <> $2
            "#,
        )
        .bind(grant.question_id.into_inner())
        .bind(grant.answer_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let result = sqlx::query(
            r#"
            UPDATE answers SET is_accepted = TRUE, rating = $2 WHERE id = $1
            "#,
        )
        .bind(grant.answer_id.into_inner())
        .bind(grant.rating)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(answer_not_found(grant.answer_id));
        }

        let balance = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE users
            SET coins = coins + $2, reputation = reputation + $3,
                accepted_answers = accepted_answers + 1, updated_at = NOW()
            WHERE id = $1
            RETURNING coins
            "#,
        )
        .bind(grant.answerer_id.into_inner())
        .bind(grant.coins)
        .bind(grant.reputation)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or_else(|| user_not_found(grant.answerer_id))?;

        let entry = entry.into_entry(balance);
        Self::insert_ledger_entry(&mut tx, &entry).await?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(entry)
    }

    #[instrument(skip(self, entry), fields(user_id = %entry.user_id))]
    async fn commit_purchase(&self, entry: NewLedgerEntry) -> RepoResult<LedgerEntry> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let balance = Self::adjust_coins(&mut tx, entry.user_id, entry.amount, "").await?;

        let entry = entry.into_entry(balance);
        Self::insert_ledger_entry(&mut tx, &entry).await?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(entry)
    }
}
