//! User entity <-> model mapper

use campus_core::entities::User;
use campus_core::value_objects::Snowflake;

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            username: model.username,
            email: model.email,
            coins: model.coins,
            reputation: model.reputation,
            total_questions: model.total_questions,
            total_answers: model.total_answers,
            accepted_answers: model.accepted_answers,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
