//! Answer service
//!
//! Handles answer submission, voting, and acceptance. Acceptance is the
//! earning side of the economy: the answerer receives the question's
//! reward (urgent bonus applied before the low-rating penalty) and a
//! matching EARN ledger entry in one transaction.

use campus_common::config::EconomyConfig;
use campus_core::{
    Answer, DomainError, NewLedgerEntry, NotificationIntent, NotificationKind, Question,
    ReputationGrant, Snowflake, Vote, VoteState, VoteTransition,
};
use tracing::{info, instrument, warn};

use crate::dto::{AcceptAnswerRequest, AnswerResponse, SubmitAnswerRequest, VoteAnswerRequest};
use crate::dto::responses::LedgerEntryResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Result of one vote request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteOutcome {
    pub answer_id: Snowflake,
    /// Voter's state after the transition
    pub state: VoteState,
    pub upvotes: i64,
    pub downvotes: i64,
}

/// Result of accepting an answer
#[derive(Debug, Clone)]
pub struct AcceptOutcome {
    pub question_id: Snowflake,
    pub answer_id: Snowflake,
    pub coins_awarded: i64,
    pub reputation_awarded: i64,
    pub entry: LedgerEntryResponse,
}

/// Answer service
pub struct AnswerService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AnswerService<'a> {
    /// Create a new AnswerService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Submit an answer to a question
    #[instrument(skip(self, request))]
    pub async fn submit_answer(
        &self,
        author_id: Snowflake,
        request: SubmitAnswerRequest,
    ) -> ServiceResult<AnswerResponse> {
        let content = request.content.trim();
        if content.chars().count() < 10 {
            return Err(ServiceError::validation(
                "Answer must be at least 10 characters",
            ));
        }

        let question = self
            .ctx
            .question_repo()
            .find_by_id(request.question_id)
            .await?
            .ok_or(DomainError::QuestionNotFound(request.question_id))?;

        if question.author_id == author_id {
            return Err(DomainError::SelfAnswer.into());
        }

        let answer = Answer::new(
            self.ctx.generate_id(),
            question.id,
            author_id,
            content.to_string(),
        );

        self.ctx.store().commit_answer_submission(&answer).await?;

        info!(
            answer_id = %answer.id,
            question_id = %question.id,
            author_id = %author_id,
            "Answer submitted"
        );

        self.notify(NotificationIntent::new(
            question.author_id,
            NotificationKind::Answer,
            "New answer",
            format!("Your question \"{}\" received a new answer", question.title),
            answer.id,
        ))
        .await;

        Ok(AnswerResponse::from(&answer))
    }

    /// Vote on an answer
    ///
    /// Re-voting the same direction retracts the vote; voting the opposite
    /// direction switches it. Reputation is credited to the answerer only
    /// on a fresh upvote.
    #[instrument(skip(self, request))]
    pub async fn vote_answer(
        &self,
        voter_id: Snowflake,
        request: VoteAnswerRequest,
    ) -> ServiceResult<VoteOutcome> {
        let requested = request.direction.into();

        let answer = self
            .ctx
            .answer_repo()
            .find_by_id(request.answer_id)
            .await?
            .ok_or(DomainError::AnswerNotFound(request.answer_id))?;

        if answer.author_id == voter_id {
            return Err(DomainError::SelfVote.into());
        }

        let existing = self.ctx.vote_repo().find(answer.id, voter_id).await?;
        let transition = VoteTransition::plan(existing.map(|v| v.direction), requested);

        let economy = self.ctx.economy();
        let reputation = match transition {
            VoteTransition::Cast(campus_core::VoteDirection::Up) => Some(ReputationGrant {
                user_id: answer.author_id,
                amount: economy.reputation_per_upvote,
            }),
            _ => None,
        };

        let vote = Vote::new(answer.id, voter_id, requested);
        self.ctx
            .store()
            .commit_vote_transition(&vote, transition, reputation)
            .await?;

        let (upvotes, downvotes) = apply_transition_to_counters(
            answer.upvotes,
            answer.downvotes,
            transition,
        );

        info!(
            answer_id = %answer.id,
            voter_id = %voter_id,
            ?transition,
            "Vote recorded"
        );

        if matches!(transition, VoteTransition::Cast(_)) {
            self.notify(NotificationIntent::new(
                answer.author_id,
                NotificationKind::Vote,
                "New vote",
                "Your answer received a vote".to_string(),
                answer.id,
            ))
            .await;
        }

        Ok(VoteOutcome {
            answer_id: answer.id,
            state: transition.resulting_state(),
            upvotes,
            downvotes,
        })
    }

    /// Accept an answer and pay out the reward
    ///
    /// Only the question's author may accept, and only once per question.
    #[instrument(skip(self, request))]
    pub async fn accept_answer(
        &self,
        asker_id: Snowflake,
        request: AcceptAnswerRequest,
    ) -> ServiceResult<AcceptOutcome> {
        let question = self
            .ctx
            .question_repo()
            .find_by_id(request.question_id)
            .await?
            .ok_or(DomainError::QuestionNotFound(request.question_id))?;

        if question.author_id != asker_id {
            return Err(ServiceError::forbidden(
                "Only the question author can accept an answer",
            ));
        }
        if question.is_answered {
            return Err(DomainError::AlreadyAnswered(question.id).into());
        }

        let answer = self
            .ctx
            .answer_repo()
            .find_by_id(request.answer_id)
            .await?
            .filter(|a| a.question_id == question.id)
            .ok_or(DomainError::AnswerNotFound(request.answer_id))?;

        if !(0..=5).contains(&request.rating) {
            return Err(DomainError::InvalidRating(request.rating).into());
        }

        let economy = self.ctx.economy();
        let (coins, reputation) = acceptance_reward(&question, &answer, request.rating, economy);

        let grant = campus_core::AcceptanceGrant {
            question_id: question.id,
            answer_id: answer.id,
            answerer_id: answer.author_id,
            rating: request.rating,
            coins,
            reputation,
        };

        let entry = NewLedgerEntry::earn(
            self.ctx.generate_id(),
            answer.author_id,
            coins,
            format!("Answer accepted: {}", question.title),
            answer.id,
        );

        let entry = self.ctx.store().commit_acceptance(&grant, entry).await?;

        info!(
            question_id = %question.id,
            answer_id = %answer.id,
            answerer_id = %answer.author_id,
            rating = request.rating,
            coins,
            reputation,
            "Answer accepted"
        );

        self.notify(NotificationIntent::new(
            answer.author_id,
            NotificationKind::Accepted,
            "Answer accepted",
            format!("Your answer was accepted and earned {coins} coins"),
            answer.id,
        ))
        .await;

        Ok(AcceptOutcome {
            question_id: question.id,
            answer_id: answer.id,
            coins_awarded: coins,
            reputation_awarded: reputation,
            entry: LedgerEntryResponse::from(entry),
        })
    }

    /// List a question's answers, oldest first
    #[instrument(skip(self))]
    pub async fn answers_for_question(
        &self,
        question_id: Snowflake,
    ) -> ServiceResult<Vec<AnswerResponse>> {
        // Existence check so a missing question is not an empty list
        self.ctx
            .question_repo()
            .find_by_id(question_id)
            .await?
            .ok_or(DomainError::QuestionNotFound(question_id))?;

        let answers = self.ctx.answer_repo().find_by_question(question_id).await?;
        Ok(answers.iter().map(AnswerResponse::from).collect())
    }

    /// Fire-and-forget notification delivery
    async fn notify(&self, intent: NotificationIntent) {
        if let Err(e) = self.ctx.notifier().deliver(intent).await {
            warn!(error = %e, "Notification delivery failed");
        }
    }
}

/// Reward paid to the answerer at acceptance time
///
/// The urgent bonus doubles both coins and reputation when the answer
/// landed inside the bonus window; a rating below the penalty threshold
/// then halves the coins and zeroes the reputation. The bonus is applied
/// before the penalty.
fn acceptance_reward(
    question: &Question,
    answer: &Answer,
    rating: i16,
    economy: &EconomyConfig,
) -> (i64, i64) {
    let mut coins = question.coin_reward;
    let mut reputation = economy.reputation_per_accepted;

    if question.within_urgent_window(answer.created_at, economy.urgent_bonus_window_minutes) {
        coins *= economy.urgent_bonus_multiplier;
        reputation *= economy.urgent_bonus_multiplier;
    }

    if rating < economy.rating_penalty_threshold {
        coins /= 2;
        reputation = 0;
    }

    (coins, reputation)
}

/// Answer counters after one transition, decrements floored at zero to
/// match the storage layer's guarded updates
fn apply_transition_to_counters(
    upvotes: i64,
    downvotes: i64,
    transition: VoteTransition,
) -> (i64, i64) {
    use campus_core::VoteDirection::{Down, Up};

    match transition {
        VoteTransition::Cast(Up) => (upvotes + 1, downvotes),
        VoteTransition::Cast(Down) => (upvotes, downvotes + 1),
        VoteTransition::Retract(Up) => ((upvotes - 1).max(0), downvotes),
        VoteTransition::Retract(Down) => (upvotes, (downvotes - 1).max(0)),
        VoteTransition::Switch { from: Up, .. } => ((upvotes - 1).max(0), downvotes + 1),
        VoteTransition::Switch { from: Down, .. } => (upvotes + 1, (downvotes - 1).max(0)),
    }
}
