//! Register Biometric Use Case
//!
//! Upserts a biometric public key onto the user record. The key is
//! write-only: the returned representation never echoes it back.

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::{IdentityError, IdentityResult};

/// Register biometric use case
pub struct RegisterBiometricUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> RegisterBiometricUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user_id: &UserId, public_key: &str) -> IdentityResult<User> {
        if public_key.trim().is_empty() {
            return Err(IdentityError::Validation(
                "Public key is required".to_string(),
            ));
        }

        let user = self
            .repo
            .set_biometric_key(user_id, public_key)
            .await?
            .ok_or(IdentityError::UserNotFound)?;

        tracing::info!(user_id = %user.user_id, "Biometric key registered");

        Ok(user)
    }
}
