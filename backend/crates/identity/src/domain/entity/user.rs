//! User Entity
//!
//! The credential-store record, minus credential material: the password
//! hash lives beside the entity in the repository and is only surfaced by
//! the login lookup. The biometric public key is write-only from the
//! domain's point of view and never leaves the infrastructure layer.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    email::Email, user_id::UserId, user_name::UserName, user_role::UserRole,
};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Opaque unique identifier
    pub user_id: UserId,
    /// Unique email, stored lowercased
    pub email: Email,
    /// Unique handle, stored lowercased
    pub username: UserName,
    /// Display name
    pub name: String,
    /// Role (User, Admin)
    pub role: UserRole,
    /// Optional profile picture URL
    pub profile_picture: Option<String>,
    /// Optional bio
    pub bio: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with the default role
    pub fn new(email: Email, username: UserName, name: impl Into<String>) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            email,
            username,
            name: name.into().trim().to_string(),
            role: UserRole::default(),
            profile_picture: None,
            bio: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults() {
        let user = User::new(
            Email::new("a@x.com").unwrap(),
            UserName::new("alice").unwrap(),
            "  Alice  ",
        );

        assert_eq!(user.role, UserRole::User);
        assert_eq!(user.name, "Alice");
        assert!(user.profile_picture.is_none());
        assert!(user.bio.is_none());
        assert_eq!(user.created_at, user.updated_at);
    }
}
