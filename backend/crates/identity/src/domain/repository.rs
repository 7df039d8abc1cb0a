//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use platform::password::HashedPassword;

use crate::domain::entity::user::User;
use crate::domain::value_object::{email::Email, user_id::UserId, user_name::UserName};
use crate::error::IdentityResult;

/// Which unique field collided during registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictField {
    Email,
    Username,
}

impl ConflictField {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConflictField::Email => "email",
            ConflictField::Username => "username",
        }
    }
}

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Persist a new user with its password hash
    async fn create(&self, user: &User, password_hash: &HashedPassword) -> IdentityResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> IdentityResult<Option<User>>;

    /// Find user by email including the password hash
    /// (the one lookup allowed to see credential material)
    async fn find_for_login(
        &self,
        email: &Email,
    ) -> IdentityResult<Option<(User, HashedPassword)>>;

    /// Combined uniqueness lookup. Reports the colliding field,
    /// preferring `Email` when both collide.
    async fn find_conflict(
        &self,
        email: &Email,
        username: &UserName,
    ) -> IdentityResult<Option<ConflictField>>;

    /// Upsert the biometric public key, returning the updated user
    /// (`None` if the record is gone)
    async fn set_biometric_key(
        &self,
        user_id: &UserId,
        public_key: &str,
    ) -> IdentityResult<Option<User>>;
}
