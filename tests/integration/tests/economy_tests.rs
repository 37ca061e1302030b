//! End-to-end tests for the reward economy services
//!
//! Each test drives the services over the in-memory store, checking the
//! money flow (debits, rewards, ledger entries) and the state machines
//! (vote transitions, acceptance terminality) the way a client would see
//! them.

use std::sync::Arc;

use campus_common::config::EconomyConfig;
use campus_core::{AcceptanceGrant, DomainError, EconomyStore, NewLedgerEntry, VoteState};
use campus_service::dto::requests::VoteDirectionParam;
use campus_service::dto::RegisterUserRequest;
use campus_service::{
    AnswerService, LedgerService, QuestionService, ServiceContextBuilder, ServiceError,
    UserService,
};
use integration_tests::{
    accept_request, answer_request, next_id, purchase_request, question_request, vote_request,
    FailingNotifier, MemStore, TestHarness,
};

// ============================================================================
// User Accounts
// ============================================================================

#[tokio::test]
async fn test_register_and_fetch_profile() {
    let h = TestHarness::new();
    let service = UserService::new(&h.ctx);

    let created = service
        .register(RegisterUserRequest {
            username: "minjun".to_string(),
            email: "minjun@campus.example".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(created.username, "minjun");
    assert_eq!(created.coins, 0);
    assert_eq!(created.reputation, 0);

    let profile = service.get_user(created.id).await.unwrap();
    assert_eq!(profile.id, created.id);
    assert_eq!(profile.total_questions, 0);
}

#[tokio::test]
async fn test_register_rejects_invalid_input() {
    let h = TestHarness::new();
    let service = UserService::new(&h.ctx);

    let err = service
        .register(RegisterUserRequest {
            username: "mj".to_string(),
            email: "mj@campus.example".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 400);

    let err = service
        .register(RegisterUserRequest {
            username: "minjun".to_string(),
            email: "not-an-email".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_profile_for_unknown_user() {
    let h = TestHarness::new();
    let service = UserService::new(&h.ctx);

    let err = service.get_user(next_id()).await.unwrap_err();
    assert_eq!(err.error_code(), "UNKNOWN_USER");
    assert_eq!(err.status_code(), 404);
}

// ============================================================================
// Question Posting
// ============================================================================

#[tokio::test]
async fn test_post_question_debits_and_logs_spend() {
    let h = TestHarness::new();
    let asker = h.seed_user(100);

    let service = QuestionService::new(&h.ctx);
    let question = service
        .post_question(asker.id, question_request(false))
        .await
        .unwrap();

    assert_eq!(question.coin_reward, 20);
    assert!(!question.is_answered);

    let asker_after = h.store.user(asker.id).unwrap();
    assert_eq!(asker_after.coins, 80);
    assert_eq!(asker_after.total_questions, 1);

    let entry = h.store.last_ledger_entry().unwrap();
    assert_eq!(entry.amount, -20);
    assert_eq!(entry.balance_after, 80);
    assert_eq!(entry.kind.as_str(), "SPEND");
}

#[tokio::test]
async fn test_urgent_question_costs_more() {
    let h = TestHarness::new();
    let asker = h.seed_user(100);

    let service = QuestionService::new(&h.ctx);
    let question = service
        .post_question(asker.id, question_request(true))
        .await
        .unwrap();

    assert_eq!(question.coin_reward, 30);
    assert_eq!(h.store.user(asker.id).unwrap().coins, 70);
}

#[tokio::test]
async fn test_post_question_insufficient_coins() {
    let h = TestHarness::new();
    let asker = h.seed_user(10);

    let service = QuestionService::new(&h.ctx);
    let err = service
        .post_question(asker.id, question_request(false))
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), "INSUFFICIENT_FUNDS");
    assert_eq!(err.status_code(), 402);

    // Nothing was written
    assert_eq!(h.store.user(asker.id).unwrap().coins, 10);
    assert_eq!(h.store.ledger_len(), 0);
}

#[tokio::test]
async fn test_post_question_validation_order() {
    let h = TestHarness::new();
    let asker = h.seed_user(0);

    let service = QuestionService::new(&h.ctx);

    // An invalid title fails before the balance is even consulted
    let mut request = question_request(false);
    request.title = "short".to_string();
    let err = service.post_question(asker.id, request).await.unwrap_err();
    assert_eq!(err.error_code(), "VALIDATION_ERROR");

    let mut request = question_request(false);
    request.description = "too short".to_string();
    let err = service.post_question(asker.id, request).await.unwrap_err();
    assert_eq!(err.error_code(), "VALIDATION_ERROR");

    let mut request = question_request(false);
    request.category = "   ".to_string();
    let err = service.post_question(asker.id, request).await.unwrap_err();
    assert_eq!(err.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_unevaluated_question_cap() {
    let h = TestHarness::new();
    let asker = h.seed_user(1000);
    let answerer = h.seed_user(0);

    let questions = QuestionService::new(&h.ctx);
    let answers = AnswerService::new(&h.ctx);

    let mut first_id = None;
    for _ in 0..5 {
        let q = questions
            .post_question(asker.id, question_request(false))
            .await
            .unwrap();
        first_id.get_or_insert(q.id);
    }

    // The sixth open question is refused
    let err = questions
        .post_question(asker.id, question_request(false))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "LIMIT_EXCEEDED");
    assert_eq!(err.status_code(), 409);

    // Accepting an answer frees a slot
    let first_id = first_id.unwrap();
    let answer = answers
        .submit_answer(answerer.id, answer_request(first_id))
        .await
        .unwrap();
    answers
        .accept_answer(asker.id, accept_request(first_id, answer.id, 4))
        .await
        .unwrap();

    questions
        .post_question(asker.id, question_request(false))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_get_question_records_view() {
    let h = TestHarness::new();
    let asker = h.seed_user(100);

    let service = QuestionService::new(&h.ctx);
    let posted = service
        .post_question(asker.id, question_request(false))
        .await
        .unwrap();

    let viewed = service.get_question(posted.id).await.unwrap();
    assert_eq!(viewed.view_count, 1);
    let viewed = service.get_question(posted.id).await.unwrap();
    assert_eq!(viewed.view_count, 2);
}

// ============================================================================
// Answer Submission
// ============================================================================

#[tokio::test]
async fn test_submit_answer_bumps_counters_and_notifies() {
    let h = TestHarness::new();
    let asker = h.seed_user(100);
    let answerer = h.seed_user(0);

    let questions = QuestionService::new(&h.ctx);
    let answers = AnswerService::new(&h.ctx);

    let question = questions
        .post_question(asker.id, question_request(false))
        .await
        .unwrap();
    let answer = answers
        .submit_answer(answerer.id, answer_request(question.id))
        .await
        .unwrap();

    assert_eq!(answer.question_id, question.id);
    assert_eq!(h.store.question(question.id).unwrap().answer_count, 1);
    assert_eq!(h.store.user(answerer.id).unwrap().total_answers, 1);

    let sent = h.notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].target_user_id, asker.id);
    assert_eq!(sent[0].kind.as_str(), "ANSWER");
}

#[tokio::test]
async fn test_self_answer_rejected() {
    let h = TestHarness::new();
    let asker = h.seed_user(100);

    let questions = QuestionService::new(&h.ctx);
    let answers = AnswerService::new(&h.ctx);

    let question = questions
        .post_question(asker.id, question_request(false))
        .await
        .unwrap();
    let err = answers
        .submit_answer(asker.id, answer_request(question.id))
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), "SELF_ACTION");
    assert_eq!(err.status_code(), 403);
    assert_eq!(h.store.question(question.id).unwrap().answer_count, 0);
}

#[tokio::test]
async fn test_notification_failure_does_not_fail_submission() {
    // Wire a harness whose notifier always errors
    let store = MemStore::new();
    let ctx = ServiceContextBuilder::new()
        .user_repo(Arc::new(store.clone()))
        .question_repo(Arc::new(store.clone()))
        .answer_repo(Arc::new(store.clone()))
        .vote_repo(Arc::new(store.clone()))
        .ledger_repo(Arc::new(store.clone()))
        .store(Arc::new(store.clone()))
        .notifier(Arc::new(FailingNotifier))
        .snowflake_generator(Arc::new(campus_core::SnowflakeGenerator::new(2)))
        .economy(EconomyConfig::default())
        .build()
        .unwrap();

    let mut asker = campus_core::User::new(
        campus_core::Snowflake::new(501),
        "asker".to_string(),
        "asker@campus.example".to_string(),
    );
    asker.coins = 100;
    store.insert_user(asker.clone());
    let answerer = campus_core::User::new(
        campus_core::Snowflake::new(502),
        "answerer".to_string(),
        "answerer@campus.example".to_string(),
    );
    store.insert_user(answerer.clone());

    let question = QuestionService::new(&ctx)
        .post_question(asker.id, question_request(false))
        .await
        .unwrap();

    // Delivery fails, the submission still succeeds
    AnswerService::new(&ctx)
        .submit_answer(answerer.id, answer_request(question.id))
        .await
        .unwrap();
    assert_eq!(store.question(question.id).unwrap().answer_count, 1);
}

// ============================================================================
// Voting
// ============================================================================

async fn seeded_answer(h: &TestHarness) -> (campus_core::Snowflake, campus_core::Snowflake) {
    let asker = h.seed_user(100);
    let answerer = h.seed_user(0);

    let question = QuestionService::new(&h.ctx)
        .post_question(asker.id, question_request(false))
        .await
        .unwrap();
    let answer = AnswerService::new(&h.ctx)
        .submit_answer(answerer.id, answer_request(question.id))
        .await
        .unwrap();

    (answer.id, answerer.id)
}

#[tokio::test]
async fn test_fresh_upvote_grants_reputation() {
    let h = TestHarness::new();
    let (answer_id, answerer_id) = seeded_answer(&h).await;
    let voter = h.seed_user(0);

    let outcome = AnswerService::new(&h.ctx)
        .vote_answer(voter.id, vote_request(answer_id, VoteDirectionParam::Up))
        .await
        .unwrap();

    assert_eq!(outcome.state, VoteState::Upvoted);
    assert_eq!(outcome.upvotes, 1);
    assert_eq!(h.store.user(answerer_id).unwrap().reputation, 10);
}

#[tokio::test]
async fn test_same_direction_vote_retracts() {
    let h = TestHarness::new();
    let (answer_id, answerer_id) = seeded_answer(&h).await;
    let voter = h.seed_user(0);

    let service = AnswerService::new(&h.ctx);
    service
        .vote_answer(voter.id, vote_request(answer_id, VoteDirectionParam::Up))
        .await
        .unwrap();
    let outcome = service
        .vote_answer(voter.id, vote_request(answer_id, VoteDirectionParam::Up))
        .await
        .unwrap();

    assert_eq!(outcome.state, VoteState::NoVote);
    assert_eq!(outcome.upvotes, 0);
    assert_eq!(outcome.downvotes, 0);

    // Reputation from the original upvote is not clawed back
    assert_eq!(h.store.user(answerer_id).unwrap().reputation, 10);
}

#[tokio::test]
async fn test_opposite_direction_vote_switches() {
    let h = TestHarness::new();
    let (answer_id, answerer_id) = seeded_answer(&h).await;
    let voter = h.seed_user(0);

    let service = AnswerService::new(&h.ctx);
    service
        .vote_answer(voter.id, vote_request(answer_id, VoteDirectionParam::Up))
        .await
        .unwrap();
    let outcome = service
        .vote_answer(voter.id, vote_request(answer_id, VoteDirectionParam::Down))
        .await
        .unwrap();

    assert_eq!(outcome.state, VoteState::Downvoted);
    assert_eq!(outcome.upvotes, 0);
    assert_eq!(outcome.downvotes, 1);

    // No extra reputation beyond the original fresh upvote
    assert_eq!(h.store.user(answerer_id).unwrap().reputation, 10);

    // Voting down again retracts; switching back up is a fresh cast and
    // grants again
    let outcome = service
        .vote_answer(voter.id, vote_request(answer_id, VoteDirectionParam::Down))
        .await
        .unwrap();
    assert_eq!(outcome.state, VoteState::NoVote);
    let outcome = service
        .vote_answer(voter.id, vote_request(answer_id, VoteDirectionParam::Up))
        .await
        .unwrap();
    assert_eq!(outcome.state, VoteState::Upvoted);
    assert_eq!(h.store.user(answerer_id).unwrap().reputation, 20);
}

#[tokio::test]
async fn test_self_vote_rejected() {
    let h = TestHarness::new();
    let (answer_id, answerer_id) = seeded_answer(&h).await;

    let err = AnswerService::new(&h.ctx)
        .vote_answer(answerer_id, vote_request(answer_id, VoteDirectionParam::Up))
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), "SELF_ACTION");
    assert_eq!(h.store.answer(answer_id).unwrap().upvotes, 0);
}

#[tokio::test]
async fn test_votes_from_multiple_users_accumulate() {
    let h = TestHarness::new();
    let (answer_id, _) = seeded_answer(&h).await;
    let service = AnswerService::new(&h.ctx);

    for _ in 0..3 {
        let voter = h.seed_user(0);
        service
            .vote_answer(voter.id, vote_request(answer_id, VoteDirectionParam::Up))
            .await
            .unwrap();
    }
    let downvoter = h.seed_user(0);
    let outcome = service
        .vote_answer(
            downvoter.id,
            vote_request(answer_id, VoteDirectionParam::Down),
        )
        .await
        .unwrap();

    assert_eq!(outcome.upvotes, 3);
    assert_eq!(outcome.downvotes, 1);
}

// ============================================================================
// Acceptance
// ============================================================================

#[tokio::test]
async fn test_accept_pays_standard_reward() {
    let h = TestHarness::new();
    let asker = h.seed_user(100);
    let answerer = h.seed_user(0);

    let question = QuestionService::new(&h.ctx)
        .post_question(asker.id, question_request(false))
        .await
        .unwrap();
    let answer = AnswerService::new(&h.ctx)
        .submit_answer(answerer.id, answer_request(question.id))
        .await
        .unwrap();

    let outcome = AnswerService::new(&h.ctx)
        .accept_answer(asker.id, accept_request(question.id, answer.id, 5))
        .await
        .unwrap();

    assert_eq!(outcome.coins_awarded, 20);
    assert_eq!(outcome.reputation_awarded, 50);
    assert_eq!(outcome.entry.kind, "EARN");
    assert_eq!(outcome.entry.balance_after, 20);

    let answerer_after = h.store.user(answerer.id).unwrap();
    assert_eq!(answerer_after.coins, 20);
    assert_eq!(answerer_after.reputation, 50);
    assert_eq!(answerer_after.accepted_answers, 1);

    let question_after = h.store.question(question.id).unwrap();
    assert!(question_after.is_answered);
    assert_eq!(question_after.accepted_answer_id, Some(answer.id));

    // The answerer hears about it
    let sent = h.notifier.sent();
    assert!(sent
        .iter()
        .any(|i| i.kind.as_str() == "ACCEPTED" && i.target_user_id == answerer.id));
}

#[tokio::test]
async fn test_accept_urgent_in_window_doubles_reward() {
    let h = TestHarness::new();
    let asker = h.seed_user(100);
    let answerer = h.seed_user(0);

    let question = QuestionService::new(&h.ctx)
        .post_question(asker.id, question_request(true))
        .await
        .unwrap();
    // Answer lands immediately, well inside the 30-minute window
    let answer = AnswerService::new(&h.ctx)
        .submit_answer(answerer.id, answer_request(question.id))
        .await
        .unwrap();

    let outcome = AnswerService::new(&h.ctx)
        .accept_answer(asker.id, accept_request(question.id, answer.id, 5))
        .await
        .unwrap();

    assert_eq!(outcome.coins_awarded, 60);
    assert_eq!(outcome.reputation_awarded, 100);
}

#[tokio::test]
async fn test_accept_low_rating_halves_coins_and_zeroes_reputation() {
    let h = TestHarness::new();
    let asker = h.seed_user(100);
    let answerer = h.seed_user(0);

    let question = QuestionService::new(&h.ctx)
        .post_question(asker.id, question_request(false))
        .await
        .unwrap();
    let answer = AnswerService::new(&h.ctx)
        .submit_answer(answerer.id, answer_request(question.id))
        .await
        .unwrap();

    let outcome = AnswerService::new(&h.ctx)
        .accept_answer(asker.id, accept_request(question.id, answer.id, 1))
        .await
        .unwrap();

    assert_eq!(outcome.coins_awarded, 10);
    assert_eq!(outcome.reputation_awarded, 0);
    assert_eq!(h.store.user(answerer.id).unwrap().reputation, 0);
}

#[tokio::test]
async fn test_accept_is_terminal() {
    let h = TestHarness::new();
    let asker = h.seed_user(100);
    let answerer = h.seed_user(0);

    let question = QuestionService::new(&h.ctx)
        .post_question(asker.id, question_request(false))
        .await
        .unwrap();
    let service = AnswerService::new(&h.ctx);
    let first = service
        .submit_answer(answerer.id, answer_request(question.id))
        .await
        .unwrap();
    let second = service
        .submit_answer(answerer.id, answer_request(question.id))
        .await
        .unwrap();

    service
        .accept_answer(asker.id, accept_request(question.id, first.id, 5))
        .await
        .unwrap();

    // A second accept fails no matter which answer it targets
    let err = service
        .accept_answer(asker.id, accept_request(question.id, second.id, 5))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "ALREADY_ANSWERED");
    assert_eq!(err.status_code(), 409);

    let err = service
        .accept_answer(asker.id, accept_request(question.id, first.id, 5))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "ALREADY_ANSWERED");

    // Only one payout happened
    assert_eq!(h.store.user(answerer.id).unwrap().coins, 20);
}

#[tokio::test]
async fn test_only_author_can_accept() {
    let h = TestHarness::new();
    let asker = h.seed_user(100);
    let answerer = h.seed_user(0);
    let stranger = h.seed_user(0);

    let question = QuestionService::new(&h.ctx)
        .post_question(asker.id, question_request(false))
        .await
        .unwrap();
    let answer = AnswerService::new(&h.ctx)
        .submit_answer(answerer.id, answer_request(question.id))
        .await
        .unwrap();

    let err = AnswerService::new(&h.ctx)
        .accept_answer(stranger.id, accept_request(question.id, answer.id, 5))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 403);
    assert!(!h.store.question(question.id).unwrap().is_answered);
}

#[tokio::test]
async fn test_accept_rejects_invalid_rating_and_foreign_answer() {
    let h = TestHarness::new();
    let asker = h.seed_user(100);
    let answerer = h.seed_user(0);

    let questions = QuestionService::new(&h.ctx);
    let answers = AnswerService::new(&h.ctx);

    let question = questions
        .post_question(asker.id, question_request(false))
        .await
        .unwrap();
    let other_question = questions
        .post_question(asker.id, question_request(false))
        .await
        .unwrap();
    let answer = answers
        .submit_answer(answerer.id, answer_request(question.id))
        .await
        .unwrap();

    let err = answers
        .accept_answer(asker.id, accept_request(question.id, answer.id, 6))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "INVALID_RATING");

    // An answer that belongs to a different question is not accepted
    let err = answers
        .accept_answer(asker.id, accept_request(other_question.id, answer.id, 5))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::AnswerNotFound(_))
    ));
}

#[tokio::test]
async fn test_failed_acceptance_commit_writes_nothing() {
    let h = TestHarness::new();
    let asker = h.seed_user(100);

    let question = QuestionService::new(&h.ctx)
        .post_question(asker.id, question_request(false))
        .await
        .unwrap();
    let ledger_before = h.store.ledger_len();

    // Drive the store directly with an answer that does not exist
    let grant = AcceptanceGrant {
        question_id: question.id,
        answer_id: next_id(),
        answerer_id: next_id(),
        rating: 5,
        coins: 20,
        reputation: 50,
    };
    let entry = NewLedgerEntry::earn(
        next_id(),
        grant.answerer_id,
        grant.coins,
        "Accepted answer".to_string(),
        grant.answer_id,
    );
    let err = h.store.commit_acceptance(&grant, entry).await.unwrap_err();
    assert!(matches!(err, DomainError::AnswerNotFound(_)));

    // The question is untouched and no ledger row was appended
    let stored = h.store.question(question.id).unwrap();
    assert!(!stored.is_answered);
    assert!(stored.accepted_answer_id.is_none());
    assert_eq!(h.store.ledger_len(), ledger_before);
}

// ============================================================================
// Ledger
// ============================================================================

#[tokio::test]
async fn test_purchase_and_summary() {
    let h = TestHarness::new();
    let user = h.seed_user(0);

    let ledger = LedgerService::new(&h.ctx);
    let entry = ledger
        .purchase_coins(user.id, purchase_request(100))
        .await
        .unwrap();
    assert_eq!(entry.kind, "PURCHASE");
    assert_eq!(entry.balance_after, 100);

    QuestionService::new(&h.ctx)
        .post_question(user.id, question_request(true))
        .await
        .unwrap();

    let summary = ledger.summary(user.id).await.unwrap();
    assert_eq!(summary.balance, 70);
    assert_eq!(summary.total_earned, 100);
    assert_eq!(summary.total_spent, 30);
}

#[tokio::test]
async fn test_purchase_rejects_non_positive_amount() {
    let h = TestHarness::new();
    let user = h.seed_user(0);

    let ledger = LedgerService::new(&h.ctx);
    let err = ledger
        .purchase_coins(user.id, purchase_request(0))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "VALIDATION_ERROR");

    let err = ledger
        .purchase_coins(user.id, purchase_request(-5))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "VALIDATION_ERROR");
    assert_eq!(h.store.ledger_len(), 0);
}

#[tokio::test]
async fn test_history_is_newest_first() {
    let h = TestHarness::new();
    let user = h.seed_user(0);

    let ledger = LedgerService::new(&h.ctx);
    ledger
        .purchase_coins(user.id, purchase_request(50))
        .await
        .unwrap();
    QuestionService::new(&h.ctx)
        .post_question(user.id, question_request(false))
        .await
        .unwrap();

    let history = ledger.history(user.id, 10).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].amount, -20);
    assert_eq!(history[1].amount, 50);

    let limited = ledger.history(user.id, 1).await.unwrap();
    assert_eq!(limited.len(), 1);
}

#[tokio::test]
async fn test_ledger_for_unknown_user() {
    let h = TestHarness::new();
    let ledger = LedgerService::new(&h.ctx);

    let err = ledger
        .summary(campus_core::Snowflake::new(999_999))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "UNKNOWN_USER");
    assert_eq!(err.status_code(), 404);
}
