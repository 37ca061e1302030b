//! Error handling utilities for repositories

use campus_core::error::DomainError;
use campus_core::value_objects::Snowflake;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::Database(e.to_string())
}

/// Create a "user not found" error
pub fn user_not_found(id: Snowflake) -> DomainError {
    DomainError::UserNotFound(id)
}

/// Create a "question not found" error
pub fn question_not_found(id: Snowflake) -> DomainError {
    DomainError::QuestionNotFound(id)
}

/// Create an "answer not found" error
pub fn answer_not_found(id: Snowflake) -> DomainError {
    DomainError::AnswerNotFound(id)
}
