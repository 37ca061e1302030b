//! In-memory implementation of the storage and notification ports
//!
//! `MemStore` mirrors the semantics of the PostgreSQL implementation:
//! each `EconomyStore` method applies all of its writes or none of them,
//! balances never go negative, vote rows are unique per (answer, voter),
//! and counter decrements are floored at zero.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use campus_core::{
    AcceptanceGrant, Answer, AnswerRepository, DomainError, EconomyStore, LedgerEntry,
    LedgerRepository, NewLedgerEntry, NotificationIntent, NotificationPort, Question,
    QuestionRepository, RepoResult, ReputationGrant, Snowflake, User, UserRepository, Vote,
    VoteRepository, VoteTransition,
};

#[derive(Default)]
struct State {
    users: HashMap<Snowflake, User>,
    questions: HashMap<Snowflake, Question>,
    answers: HashMap<Snowflake, Answer>,
    votes: HashMap<(Snowflake, Snowflake), Vote>,
    ledger: Vec<LedgerEntry>,
}

/// Shared in-memory store implementing every storage port
#[derive(Clone, Default)]
pub struct MemStore {
    state: Arc<Mutex<State>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user directly, bypassing the purchase path
    pub fn insert_user(&self, user: User) {
        self.state.lock().users.insert(user.id, user);
    }

    /// Snapshot of one user's current state
    pub fn user(&self, id: Snowflake) -> Option<User> {
        self.state.lock().users.get(&id).cloned()
    }

    /// Snapshot of one question's current state
    pub fn question(&self, id: Snowflake) -> Option<Question> {
        self.state.lock().questions.get(&id).cloned()
    }

    /// Snapshot of one answer's current state
    pub fn answer(&self, id: Snowflake) -> Option<Answer> {
        self.state.lock().answers.get(&id).cloned()
    }

    /// Number of ledger entries written so far
    pub fn ledger_len(&self) -> usize {
        self.state.lock().ledger.len()
    }

    /// The most recently written ledger entry
    pub fn last_ledger_entry(&self) -> Option<LedgerEntry> {
        self.state.lock().ledger.last().cloned()
    }
}

// ============================================================================
// Read repositories
// ============================================================================

#[async_trait]
impl UserRepository for MemStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        Ok(self.state.lock().users.get(&id).cloned())
    }

    async fn create(&self, user: &User) -> RepoResult<()> {
        self.state.lock().users.insert(user.id, user.clone());
        Ok(())
    }
}

#[async_trait]
impl QuestionRepository for MemStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Question>> {
        Ok(self.state.lock().questions.get(&id).cloned())
    }

    async fn find_by_author(&self, author_id: Snowflake) -> RepoResult<Vec<Question>> {
        let state = self.state.lock();
        let mut questions: Vec<Question> = state
            .questions
            .values()
            .filter(|q| q.author_id == author_id)
            .cloned()
            .collect();
        questions.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(questions)
    }

    async fn unevaluated_count(&self, author_id: Snowflake) -> RepoResult<i64> {
        let state = self.state.lock();
        Ok(state
            .questions
            .values()
            .filter(|q| q.author_id == author_id && q.accepted_answer_id.is_none())
            .count() as i64)
    }

    async fn record_view(&self, id: Snowflake) -> RepoResult<()> {
        let mut state = self.state.lock();
        let question = state
            .questions
            .get_mut(&id)
            .ok_or(DomainError::QuestionNotFound(id))?;
        question.view_count += 1;
        Ok(())
    }
}

#[async_trait]
impl AnswerRepository for MemStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Answer>> {
        Ok(self.state.lock().answers.get(&id).cloned())
    }

    async fn find_by_question(&self, question_id: Snowflake) -> RepoResult<Vec<Answer>> {
        let state = self.state.lock();
        let mut answers: Vec<Answer> = state
            .answers
            .values()
            .filter(|a| a.question_id == question_id)
            .cloned()
            .collect();
        answers.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(answers)
    }

    async fn find_accepted(&self, question_id: Snowflake) -> RepoResult<Option<Answer>> {
        let state = self.state.lock();
        Ok(state
            .answers
            .values()
            .find(|a| a.question_id == question_id && a.is_accepted)
            .cloned())
    }
}

#[async_trait]
impl VoteRepository for MemStore {
    async fn find(&self, answer_id: Snowflake, user_id: Snowflake) -> RepoResult<Option<Vote>> {
        Ok(self.state.lock().votes.get(&(answer_id, user_id)).copied())
    }
}

#[async_trait]
impl LedgerRepository for MemStore {
    async fn find_by_user(&self, user_id: Snowflake, limit: i64) -> RepoResult<Vec<LedgerEntry>> {
        let state = self.state.lock();
        Ok(state
            .ledger
            .iter()
            .rev()
            .filter(|e| e.user_id == user_id)
            .take(limit.clamp(1, 100) as usize)
            .cloned()
            .collect())
    }

    async fn total_earned(&self, user_id: Snowflake) -> RepoResult<i64> {
        let state = self.state.lock();
        Ok(state
            .ledger
            .iter()
            .filter(|e| e.user_id == user_id && e.amount > 0)
            .map(|e| e.amount)
            .sum())
    }

    async fn total_spent(&self, user_id: Snowflake) -> RepoResult<i64> {
        let state = self.state.lock();
        Ok(state
            .ledger
            .iter()
            .filter(|e| e.user_id == user_id && e.amount < 0)
            .map(|e| -e.amount)
            .sum())
    }
}

// ============================================================================
// Transactional economy store
// ============================================================================

impl State {
    /// Apply a signed coin delta, refusing to overdraw
    fn adjust_coins(&mut self, user_id: Snowflake, delta: i64) -> RepoResult<i64> {
        let user = self
            .users
            .get_mut(&user_id)
            .ok_or(DomainError::UserNotFound(user_id))?;
        if user.coins + delta < 0 {
            return Err(DomainError::InsufficientCoins {
                required: -delta,
                balance: user.coins,
            });
        }
        user.coins += delta;
        Ok(user.coins)
    }
}

#[async_trait]
impl EconomyStore for MemStore {
    async fn commit_question_post(
        &self,
        question: &Question,
        entry: NewLedgerEntry,
    ) -> RepoResult<LedgerEntry> {
        let mut state = self.state.lock();

        // Validate the debit before touching anything else
        let balance = state.adjust_coins(question.author_id, entry.amount)?;
        if let Some(user) = state.users.get_mut(&question.author_id) {
            user.total_questions += 1;
        }
        state.questions.insert(question.id, question.clone());

        let entry = entry.into_entry(balance);
        state.ledger.push(entry.clone());
        Ok(entry)
    }

    async fn commit_answer_submission(&self, answer: &Answer) -> RepoResult<()> {
        let mut state = self.state.lock();

        if !state.questions.contains_key(&answer.question_id) {
            return Err(DomainError::QuestionNotFound(answer.question_id));
        }
        if !state.users.contains_key(&answer.author_id) {
            return Err(DomainError::UserNotFound(answer.author_id));
        }

        state.answers.insert(answer.id, answer.clone());
        if let Some(question) = state.questions.get_mut(&answer.question_id) {
            question.answer_count += 1;
        }
        if let Some(user) = state.users.get_mut(&answer.author_id) {
            user.total_answers += 1;
        }
        Ok(())
    }

    async fn commit_vote_transition(
        &self,
        vote: &Vote,
        transition: VoteTransition,
        reputation: Option<ReputationGrant>,
    ) -> RepoResult<()> {
        let mut state = self.state.lock();
        let key = (vote.answer_id, vote.user_id);

        match transition {
            VoteTransition::Cast(direction) => {
                if state.votes.contains_key(&key) {
                    return Err(DomainError::VoteConflict);
                }
                let answer = state
                    .answers
                    .get_mut(&vote.answer_id)
                    .ok_or(DomainError::AnswerNotFound(vote.answer_id))?;
                match direction {
                    campus_core::VoteDirection::Up => answer.upvotes += 1,
                    campus_core::VoteDirection::Down => answer.downvotes += 1,
                }
                state.votes.insert(key, *vote);
            }

            VoteTransition::Retract(direction) => {
                match state.votes.get(&key) {
                    Some(existing) if existing.direction == direction => {}
                    _ => return Err(DomainError::VoteConflict),
                }
                state.votes.remove(&key);
                let answer = state
                    .answers
                    .get_mut(&vote.answer_id)
                    .ok_or(DomainError::AnswerNotFound(vote.answer_id))?;
                match direction {
                    campus_core::VoteDirection::Up => {
                        answer.upvotes = (answer.upvotes - 1).max(0);
                    }
                    campus_core::VoteDirection::Down => {
                        answer.downvotes = (answer.downvotes - 1).max(0);
                    }
                }
            }

            VoteTransition::Switch { from, to } => {
                match state.votes.get_mut(&key) {
                    Some(existing) if existing.direction == from => {
                        existing.direction = to;
                    }
                    _ => return Err(DomainError::VoteConflict),
                }
                let answer = state
                    .answers
                    .get_mut(&vote.answer_id)
                    .ok_or(DomainError::AnswerNotFound(vote.answer_id))?;
                match from {
                    campus_core::VoteDirection::Up => {
                        answer.upvotes = (answer.upvotes - 1).max(0);
                        answer.downvotes += 1;
                    }
                    campus_core::VoteDirection::Down => {
                        answer.downvotes = (answer.downvotes - 1).max(0);
                        answer.upvotes += 1;
                    }
                }
            }
        }

        if let Some(grant) = reputation {
            let user = state
                .users
                .get_mut(&grant.user_id)
                .ok_or(DomainError::UserNotFound(grant.user_id))?;
            user.reputation += grant.amount;
        }

        Ok(())
    }

    async fn commit_acceptance(
        &self,
        grant: &AcceptanceGrant,
        entry: NewLedgerEntry,
    ) -> RepoResult<LedgerEntry> {
        let mut state = self.state.lock();

        // All lookups precede the first write so a failed commit leaves
        // no partial state.
        let question = state
            .questions
            .get(&grant.question_id)
            .ok_or(DomainError::QuestionNotFound(grant.question_id))?;
        if question.is_answered {
            return Err(DomainError::AlreadyAnswered(grant.question_id));
        }
        if !state.answers.contains_key(&grant.answer_id) {
            return Err(DomainError::AnswerNotFound(grant.answer_id));
        }
        if !state.users.contains_key(&grant.answerer_id) {
            return Err(DomainError::UserNotFound(grant.answerer_id));
        }

        {
            let question = state
                .questions
                .get_mut(&grant.question_id)
                .ok_or(DomainError::QuestionNotFound(grant.question_id))?;
            question.is_answered = true;
            question.accepted_answer_id = Some(grant.answer_id);
        }

        {
            let answer = state
                .answers
                .get_mut(&grant.answer_id)
                .ok_or(DomainError::AnswerNotFound(grant.answer_id))?;
            answer.is_accepted = true;
            answer.rating = Some(grant.rating);
        }

        let balance = {
            let user = state
                .users
                .get_mut(&grant.answerer_id)
                .ok_or(DomainError::UserNotFound(grant.answerer_id))?;
            user.coins += grant.coins;
            user.reputation += grant.reputation;
            user.accepted_answers += 1;
            user.coins
        };

        let entry = entry.into_entry(balance);
        state.ledger.push(entry.clone());
        Ok(entry)
    }

    async fn commit_purchase(&self, entry: NewLedgerEntry) -> RepoResult<LedgerEntry> {
        let mut state = self.state.lock();
        let balance = state.adjust_coins(entry.user_id, entry.amount)?;
        let entry = entry.into_entry(balance);
        state.ledger.push(entry.clone());
        Ok(entry)
    }
}

// ============================================================================
// Notification port
// ============================================================================

/// Notifier that records every delivered intent
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<NotificationIntent>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All intents delivered so far, in order
    pub fn sent(&self) -> Vec<NotificationIntent> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl NotificationPort for RecordingNotifier {
    async fn deliver(&self, intent: NotificationIntent) -> RepoResult<()> {
        self.sent.lock().push(intent);
        Ok(())
    }
}

/// Notifier whose delivery always fails, for fire-and-forget checks
#[derive(Default)]
pub struct FailingNotifier;

#[async_trait]
impl NotificationPort for FailingNotifier {
    async fn deliver(&self, _intent: NotificationIntent) -> RepoResult<()> {
        Err(DomainError::Internal("delivery unavailable".to_string()))
    }
}
