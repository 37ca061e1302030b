//! # campus-db
//!
//! Database layer implementing the domain ports with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for the repository traits
//! and the transactional `EconomyStore` port defined in `campus-core`:
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations
//! - `PgEconomyStore`, which wraps every economy write-set in one
//!   transaction with guarded relative increments
//!
//! ## Usage
//!
//! ```rust,ignore
//! use campus_db::pool::PoolConfig;
//! use campus_db::repositories::PgQuestionRepository;
//! use campus_core::traits::QuestionRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = PoolConfig::from_env()?.connect().await?;
//!     let question_repo = PgQuestionRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

pub use pool::{connect_from_env, PgPool, PoolConfig};
pub use repositories::{
    PgAnswerRepository, PgEconomyStore, PgLedgerRepository, PgQuestionRepository,
    PgUserRepository, PgVoteRepository,
};
