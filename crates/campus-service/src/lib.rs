//! # campus-service
//!
//! Application layer of the reward economy engine: the question, answer,
//! and ledger services plus their dependency container and DTOs.
//!
//! Every public operation executes its writes as one transaction through
//! the `EconomyStore` port; presentation code only ever talks to these
//! services, never to the repositories directly.

pub mod dto;
pub mod services;

pub use services::{
    AcceptOutcome, AnswerService, CoinSummary, LedgerService, QuestionService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, UserService, VoteOutcome,
};
