//! Database models - SQLx-compatible structs for PostgreSQL tables

mod answer;
mod ledger;
mod question;
mod user;
mod vote;

pub use answer::AnswerModel;
pub use ledger::LedgerEntryModel;
pub use question::QuestionModel;
pub use user::UserModel;
pub use vote::VoteModel;
