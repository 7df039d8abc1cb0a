//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::user::User;
use crate::domain::repository::{ConflictField, UserRepository};
use crate::domain::value_object::{
    email::Email, user_id::UserId, user_name::UserName, user_role::UserRole,
};
use crate::error::{IdentityError, IdentityResult};

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const USER_COLUMNS: &str = r#"
    user_id,
    email,
    username,
    display_name,
    user_role,
    profile_picture,
    bio,
    created_at,
    updated_at
"#;

impl UserRepository for PgUserRepository {
    async fn create(&self, user: &User, password_hash: &HashedPassword) -> IdentityResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                email,
                username,
                display_name,
                password_hash,
                user_role,
                profile_picture,
                bio,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.email.as_str())
        .bind(user.username.as_str())
        .bind(&user.name)
        .bind(password_hash.as_phc_string())
        .bind(user.role.id())
        .bind(&user.profile_picture)
        .bind(&user.bio)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> IdentityResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn find_for_login(
        &self,
        email: &Email,
    ) -> IdentityResult<Option<(User, HashedPassword)>> {
        let row = sqlx::query_as::<_, LoginRow>(&format!(
            "SELECT {USER_COLUMNS}, password_hash FROM users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(LoginRow::into_user_and_hash).transpose()
    }

    async fn find_conflict(
        &self,
        email: &Email,
        username: &UserName,
    ) -> IdentityResult<Option<ConflictField>> {
        let rows: Vec<(String, String)> = sqlx::query_as(
            "SELECT email, username FROM users WHERE email = $1 OR username = $2",
        )
        .bind(email.as_str())
        .bind(username.as_str())
        .fetch_all(&self.pool)
        .await?;

        if rows.is_empty() {
            return Ok(None);
        }

        // Email is checked first; report it when any row matches on email
        if rows.iter().any(|(e, _)| e == email.as_str()) {
            Ok(Some(ConflictField::Email))
        } else {
            Ok(Some(ConflictField::Username))
        }
    }

    async fn set_biometric_key(
        &self,
        user_id: &UserId,
        public_key: &str,
    ) -> IdentityResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users
            SET biometric_public_key = $2, updated_at = $3
            WHERE user_id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id.as_uuid())
        .bind(public_key)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_user))
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    email: String,
    username: String,
    display_name: String,
    user_role: i16,
    profile_picture: Option<String>,
    bio: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            user_id: UserId::from_uuid(self.user_id),
            email: Email::from_db(self.email),
            username: UserName::from_db(self.username),
            name: self.display_name,
            role: UserRole::from_id(self.user_role),
            profile_picture: self.profile_picture,
            bio: self.bio,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct LoginRow {
    user_id: Uuid,
    email: String,
    username: String,
    display_name: String,
    user_role: i16,
    profile_picture: Option<String>,
    bio: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    password_hash: String,
}

impl LoginRow {
    fn into_user_and_hash(self) -> IdentityResult<(User, HashedPassword)> {
        let hash = HashedPassword::from_phc_string(&self.password_hash)
            .map_err(|e| IdentityError::Internal(e.to_string()))?;

        let user = User {
            user_id: UserId::from_uuid(self.user_id),
            email: Email::from_db(self.email),
            username: UserName::from_db(self.username),
            name: self.display_name,
            role: UserRole::from_id(self.user_role),
            profile_picture: self.profile_picture,
            bio: self.bio,
            created_at: self.created_at,
            updated_at: self.updated_at,
        };

        Ok((user, hash))
    }
}
