//! Question service
//!
//! Posting a question is the spending side of the economy: the cost is
//! debited up front, the paid amount becomes the question's fixed reward,
//! and a SPEND ledger entry is appended in the same transaction.

use campus_core::{DomainError, NewLedgerEntry, Question};
use tracing::{info, instrument};

use crate::dto::{PostQuestionRequest, QuestionResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Question service
pub struct QuestionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> QuestionService<'a> {
    /// Create a new QuestionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Post a new question, debiting the author
    ///
    /// Checks run in order: field validation, author existence, the open
    /// question cap, then affordability. The debit itself is re-checked
    /// inside the transaction, so a concurrent spend cannot overdraw.
    #[instrument(skip(self, request))]
    pub async fn post_question(
        &self,
        author_id: campus_core::Snowflake,
        request: PostQuestionRequest,
    ) -> ServiceResult<QuestionResponse> {
        let title = request.title.trim();
        if title.chars().count() < 10 {
            return Err(ServiceError::validation(
                "Title must be at least 10 characters",
            ));
        }
        let description = request.description.trim();
        if description.chars().count() < 20 {
            return Err(ServiceError::validation(
                "Description must be at least 20 characters",
            ));
        }
        let category = request.category.trim();
        if category.is_empty() {
            return Err(ServiceError::validation("Category is required"));
        }

        let user = self
            .ctx
            .user_repo()
            .find_by_id(author_id)
            .await?
            .ok_or(DomainError::UserNotFound(author_id))?;

        let economy = self.ctx.economy();
        let open = self.ctx.question_repo().unevaluated_count(author_id).await?;
        if open >= i64::from(economy.max_unevaluated_questions) {
            return Err(DomainError::UnevaluatedLimitReached {
                limit: economy.max_unevaluated_questions,
            }
            .into());
        }

        let cost = economy.question_cost(request.is_urgent);
        if !user.can_afford(cost) {
            return Err(DomainError::InsufficientCoins {
                required: cost,
                balance: user.coins,
            }
            .into());
        }

        let question = Question::new(
            self.ctx.generate_id(),
            author_id,
            title.to_string(),
            description.to_string(),
            category.to_string(),
            request.is_urgent,
            cost,
        );

        let entry = NewLedgerEntry::spend(
            self.ctx.generate_id(),
            author_id,
            cost,
            format!("Posted question: {title}"),
            question.id,
        );

        let entry = self.ctx.store().commit_question_post(&question, entry).await?;

        info!(
            question_id = %question.id,
            author_id = %author_id,
            cost,
            is_urgent = request.is_urgent,
            balance_after = entry.balance_after,
            "Question posted"
        );

        Ok(QuestionResponse::from(&question))
    }

    /// Get a question by ID, recording the view
    #[instrument(skip(self))]
    pub async fn get_question(
        &self,
        question_id: campus_core::Snowflake,
    ) -> ServiceResult<QuestionResponse> {
        self.ctx.question_repo().record_view(question_id).await?;

        let question = self
            .ctx
            .question_repo()
            .find_by_id(question_id)
            .await?
            .ok_or(DomainError::QuestionNotFound(question_id))?;

        Ok(QuestionResponse::from(&question))
    }

    /// List a user's questions, newest first
    #[instrument(skip(self))]
    pub async fn questions_by_author(
        &self,
        author_id: campus_core::Snowflake,
    ) -> ServiceResult<Vec<QuestionResponse>> {
        let questions = self.ctx.question_repo().find_by_author(author_id).await?;
        Ok(questions.iter().map(QuestionResponse::from).collect())
    }
}
