//! # campus-core
//!
//! Domain layer for the campus Q&A reward engine: entities, value objects,
//! port traits, and domain errors. This crate has zero dependencies on
//! infrastructure (database, UI framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Answer, LedgerEntry, LedgerKind, NewLedgerEntry, NotificationIntent, NotificationKind,
    Question, ReferenceType, User, Vote, VoteDirection, VoteState, VoteTransition,
};
pub use error::DomainError;
pub use traits::{
    AcceptanceGrant, AnswerRepository, EconomyStore, LedgerRepository, NotificationPort,
    QuestionRepository, RepoResult, ReputationGrant, UserRepository, VoteRepository,
};
pub use value_objects::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
