//! Service layer - business logic orchestration
//!
//! Services validate inputs in business order, plan the write-set, and
//! commit it through the transactional `EconomyStore` port.

pub mod answer;
pub mod context;
pub mod error;
pub mod ledger;
pub mod question;
pub mod user;

pub use answer::{AcceptOutcome, AnswerService, VoteOutcome};
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use ledger::{CoinSummary, LedgerService};
pub use question::QuestionService;
pub use user::UserService;
