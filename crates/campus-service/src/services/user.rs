//! User service
//!
//! Account registration and profile reads. New accounts start with a
//! zeroed economy state; coins only enter through the ledger
//! (purchases and acceptance rewards).

use campus_core::{DomainError, Snowflake, User};
use tracing::{info, instrument};

use crate::dto::{RegisterUserRequest, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user account
    #[instrument(skip(self, request))]
    pub async fn register(&self, request: RegisterUserRequest) -> ServiceResult<UserResponse> {
        let username = request.username.trim();
        if username.chars().count() < 3 {
            return Err(ServiceError::validation(
                "Username must be at least 3 characters",
            ));
        }
        let email = request.email.trim();
        if !email.contains('@') {
            return Err(ServiceError::validation(
                "A valid email address is required",
            ));
        }

        let user = User::new(
            self.ctx.generate_id(),
            username.to_string(),
            email.to_string(),
        );
        self.ctx.user_repo().create(&user).await?;

        info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(UserResponse::from(&user))
    }

    /// Get a user's public profile
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: Snowflake) -> ServiceResult<UserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        Ok(UserResponse::from(&user))
    }
}
