//! Data transfer objects for the economy services
//!
//! This module provides:
//! - Request DTOs with validation for client inputs
//! - Response DTOs for serializing engine outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    AcceptAnswerRequest, PostQuestionRequest, PurchaseCoinsRequest, RegisterUserRequest,
    SubmitAnswerRequest, VoteAnswerRequest,
};

// Re-export commonly used response types
pub use responses::{
    AnswerResponse, CoinSummaryResponse, LedgerEntryResponse, QuestionResponse, UserResponse,
};
