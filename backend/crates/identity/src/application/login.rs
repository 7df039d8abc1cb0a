//! Login Use Case
//!
//! Verifies credentials and issues a bearer token. Every failure path
//! returns the same generic `InvalidCredentials` so callers cannot tell
//! an unknown email from a wrong password.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::IdentityConfig;
use crate::application::token::TokenService;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{IdentityError, IdentityResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    pub token: String,
    pub user: User,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<IdentityConfig>,
}

impl<R> LoginUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<IdentityConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: LoginInput) -> IdentityResult<LoginOutput> {
        if input.email.trim().is_empty() || input.password.is_empty() {
            return Err(IdentityError::Validation(
                "Email and password are required".to_string(),
            ));
        }

        // A malformed email can never match a stored (validated) one
        let email =
            Email::new(&input.email).map_err(|_| IdentityError::InvalidCredentials)?;

        let (user, password_hash) = self
            .repo
            .find_for_login(&email)
            .await?
            .ok_or(IdentityError::InvalidCredentials)?;

        let password = ClearTextPassword::new(input.password)
            .map_err(|_| IdentityError::InvalidCredentials)?;

        if !password_hash.verify(&password, self.config.pepper()) {
            return Err(IdentityError::InvalidCredentials);
        }

        let token = TokenService::new(self.config.clone()).issue(&user.user_id)?;

        tracing::info!(user_id = %user.user_id, "User logged in");

        Ok(LoginOutput { token, user })
    }
}
