//! Answer entity <-> model mapper

use campus_core::entities::Answer;
use campus_core::value_objects::Snowflake;

use crate::models::AnswerModel;

impl From<AnswerModel> for Answer {
    fn from(model: AnswerModel) -> Self {
        Answer {
            id: Snowflake::new(model.id),
            question_id: Snowflake::new(model.question_id),
            author_id: Snowflake::new(model.author_id),
            content: model.content,
            rating: model.rating,
            upvotes: model.upvotes,
            downvotes: model.downvotes,
            is_accepted: model.is_accepted,
            created_at: model.created_at,
        }
    }
}
