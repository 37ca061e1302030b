//! Entity-to-DTO mappers

use campus_core::{Answer, LedgerEntry, Question, User};

use super::responses::{
    AnswerResponse, CoinSummaryResponse, LedgerEntryResponse, QuestionResponse, UserResponse,
};
use crate::services::CoinSummary;

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            coins: user.coins,
            reputation: user.display_reputation(),
            total_questions: user.total_questions,
            total_answers: user.total_answers,
            accepted_answers: user.accepted_answers,
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<&Question> for QuestionResponse {
    fn from(question: &Question) -> Self {
        Self {
            id: question.id,
            author_id: question.author_id,
            title: question.title.clone(),
            description: question.description.clone(),
            category: question.category.clone(),
            coin_reward: question.coin_reward,
            is_urgent: question.is_urgent,
            is_answered: question.is_answered,
            accepted_answer_id: question.accepted_answer_id,
            answer_count: question.answer_count,
            view_count: question.view_count,
            created_at: question.created_at,
            updated_at: question.updated_at,
        }
    }
}

impl From<Question> for QuestionResponse {
    fn from(question: Question) -> Self {
        Self::from(&question)
    }
}

impl From<&Answer> for AnswerResponse {
    fn from(answer: &Answer) -> Self {
        Self {
            id: answer.id,
            question_id: answer.question_id,
            author_id: answer.author_id,
            content: answer.content.clone(),
            upvotes: answer.upvotes,
            downvotes: answer.downvotes,
            score: answer.score(),
            is_accepted: answer.is_accepted,
            rating: answer.rating,
            created_at: answer.created_at,
        }
    }
}

impl From<Answer> for AnswerResponse {
    fn from(answer: Answer) -> Self {
        Self::from(&answer)
    }
}

impl From<&LedgerEntry> for LedgerEntryResponse {
    fn from(entry: &LedgerEntry) -> Self {
        Self {
            id: entry.id,
            user_id: entry.user_id,
            kind: entry.kind.as_str().to_string(),
            amount: entry.amount,
            balance_after: entry.balance_after,
            description: entry.description.clone(),
            reference_type: entry.reference_type.map(|rt| rt.as_str().to_string()),
            reference_id: entry.reference_id,
            created_at: entry.created_at,
        }
    }
}

impl From<LedgerEntry> for LedgerEntryResponse {
    fn from(entry: LedgerEntry) -> Self {
        Self::from(&entry)
    }
}

impl From<&CoinSummary> for CoinSummaryResponse {
    fn from(summary: &CoinSummary) -> Self {
        Self {
            user_id: summary.user_id,
            balance: summary.balance,
            total_earned: summary.total_earned,
            total_spent: summary.total_spent,
        }
    }
}

impl From<CoinSummary> for CoinSummaryResponse {
    fn from(summary: CoinSummary) -> Self {
        Self::from(&summary)
    }
}
