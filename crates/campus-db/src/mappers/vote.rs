//! Vote entity <-> model mapper
//!
//! Conversion is fallible: a stored direction outside {+1, -1} means the
//! row was written by something other than this engine.

use campus_core::entities::{Vote, VoteDirection};
use campus_core::error::DomainError;
use campus_core::value_objects::Snowflake;

use crate::models::VoteModel;

impl TryFrom<VoteModel> for Vote {
    type Error = DomainError;

    fn try_from(model: VoteModel) -> Result<Self, Self::Error> {
        let direction = VoteDirection::from_value(model.direction).ok_or_else(|| {
            DomainError::Internal(format!("invalid vote direction in store: {}", model.direction))
        })?;

        Ok(Vote {
            answer_id: Snowflake::new(model.answer_id),
            user_id: Snowflake::new(model.user_id),
            direction,
            created_at: model.created_at,
        })
    }
}
