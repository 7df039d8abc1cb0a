//! Register Use Case
//!
//! Creates a new user account and issues its first bearer token.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::IdentityConfig;
use crate::application::token::TokenService;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_name::UserName};
use crate::error::{IdentityError, IdentityResult};

/// Register input
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub name: String,
    pub username: String,
}

/// Register output
#[derive(Debug)]
pub struct RegisterOutput {
    pub token: String,
    pub user: User,
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<IdentityConfig>,
}

impl<R> RegisterUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<IdentityConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> IdentityResult<RegisterOutput> {
        // All four fields are required
        if input.email.trim().is_empty()
            || input.password.is_empty()
            || input.name.trim().is_empty()
            || input.username.trim().is_empty()
        {
            return Err(IdentityError::Validation(
                "All fields are required".to_string(),
            ));
        }

        // Validate and normalize (lowercase + trim) email and username
        let email = Email::new(&input.email)
            .map_err(|_| IdentityError::Validation("Invalid email format".to_string()))?;
        let username = UserName::new(&input.username)
            .map_err(|e| IdentityError::Validation(e.to_string()))?;

        // Combined case-insensitive uniqueness check; email wins if both collide
        if let Some(field) = self.repo.find_conflict(&email, &username).await? {
            return Err(IdentityError::Conflict(field));
        }

        // Hash password
        let password = ClearTextPassword::new(input.password)
            .map_err(|e| IdentityError::Validation(e.to_string()))?;
        let password_hash = password
            .hash(self.config.pepper())
            .map_err(|e| IdentityError::Internal(e.to_string()))?;

        // Persist
        let user = User::new(email, username, input.name);
        self.repo.create(&user, &password_hash).await?;

        // Issue token
        let token = TokenService::new(self.config.clone()).issue(&user.user_id)?;

        tracing::info!(
            user_id = %user.user_id,
            username = %user.username,
            "User registered"
        );

        Ok(RegisterOutput { token, user })
    }
}
