//! PostgreSQL repository and store implementations

mod answer;
mod economy;
mod error;
mod ledger;
mod question;
mod user;
mod vote;

pub use answer::PgAnswerRepository;
pub use economy::PgEconomyStore;
pub use ledger::PgLedgerRepository;
pub use question::PgQuestionRepository;
pub use user::PgUserRepository;
pub use vote::PgVoteRepository;
