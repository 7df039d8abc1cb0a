//! Get Profile Use Case

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::{IdentityError, IdentityResult};

/// Get profile use case
pub struct GetProfileUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> GetProfileUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Fetch the authenticated user's public representation.
    /// The record can be gone even though the token verified
    /// (concurrent deletion).
    pub async fn execute(&self, user_id: &UserId) -> IdentityResult<User> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(IdentityError::UserNotFound)
    }
}
