//! Question entity <-> model mapper

use campus_core::entities::Question;
use campus_core::value_objects::Snowflake;

use crate::models::QuestionModel;

impl From<QuestionModel> for Question {
    fn from(model: QuestionModel) -> Self {
        Question {
            id: Snowflake::new(model.id),
            author_id: Snowflake::new(model.author_id),
            title: model.title,
            description: model.description,
            category: model.category,
            is_urgent: model.is_urgent,
            coin_reward: model.coin_reward,
            is_answered: model.is_answered,
            accepted_answer_id: model.accepted_answer_id.map(Snowflake::new),
            answer_count: model.answer_count,
            view_count: model.view_count,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
