//! Port traits - interfaces the domain requires from the outside world

mod ports;
mod repositories;

pub use ports::{AcceptanceGrant, EconomyStore, NotificationPort, ReputationGrant};
pub use repositories::{
    AnswerRepository, LedgerRepository, QuestionRepository, RepoResult, UserRepository,
    VoteRepository,
};
