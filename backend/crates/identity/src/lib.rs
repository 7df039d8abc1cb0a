//! Identity Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases, token service, configuration
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Registration with case-insensitive email/username uniqueness
//! - Login with stateless signed bearer tokens (7-day expiry)
//! - Profile retrieval and biometric public-key registration
//! - Bearer-auth middleware attaching the resolved user to the request
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, never present in responses
//! - Tokens are HMAC-SHA256 signed claims, verified in constant time
//! - Login failures are indistinguishable (no account enumeration)

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::IdentityConfig;
pub use application::token::TokenService;
pub use error::{IdentityError, IdentityResult};
pub use infra::postgres::PgUserRepository;
pub use presentation::middleware::CurrentUser;
pub use presentation::router::identity_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
