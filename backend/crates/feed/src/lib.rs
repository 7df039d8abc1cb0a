//! Feed Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Post aggregate, repository traits
//! - `application/` - Engagement use cases
//! - `infra/` - PostgreSQL repository (row-locked aggregate mutations)
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Post creation with optional text, media upload, and repost snapshot
//! - Idempotent like toggle, append-only comments, add-once shares
//! - Author-only deletion with best-effort media cleanup
//! - Per-aggregate write serialization (no lost engagement updates)
//!
//! Engagement counts are derived at render time; the stored aggregate keeps
//! only the membership lists.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use error::{FeedError, FeedResult};
pub use infra::postgres::PgPostRepository;
pub use presentation::router::{feed_router, feed_router_generic};

// Convenience re-exports
pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}
