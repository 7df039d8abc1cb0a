//! Feed Router
//!
//! Every route requires an authenticated user; the bearer-auth middleware
//! is attached by the composition root so the router stays transport-only.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
};
use std::sync::Arc;

use identity::domain::repository::UserRepository;
use identity::infra::postgres::PgUserRepository;
use platform::storage::{DiskMediaStorage, MAX_MEDIA_BYTES, MediaStorage};

use crate::domain::repository::PostRepository;
use crate::infra::postgres::PgPostRepository;
use crate::presentation::handlers::{self, FeedAppState};

// Multipart overhead on top of the media limit
const BODY_LIMIT: usize = MAX_MEDIA_BYTES + 1024 * 1024;

/// Create the Feed router with PostgreSQL and local-disk storage
pub fn feed_router(
    posts: PgPostRepository,
    users: PgUserRepository,
    storage: DiskMediaStorage,
) -> Router {
    feed_router_generic(Arc::new(posts), Arc::new(users), Arc::new(storage))
}

/// Create a generic Feed router for any repository/storage implementation
pub fn feed_router_generic<P, U, S>(posts: Arc<P>, users: Arc<U>, storage: Arc<S>) -> Router
where
    P: PostRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    S: MediaStorage + Send + Sync + 'static,
{
    let state = FeedAppState {
        posts,
        users,
        storage,
    };

    Router::new()
        .route("/", post(handlers::create_post::<P, U, S>))
        .route("/my-posts", get(handlers::my_posts::<P, U, S>))
        .route("/{post_id}/like", post(handlers::toggle_like::<P, U, S>))
        .route("/{post_id}/comments", post(handlers::add_comment::<P, U, S>))
        .route("/{post_id}/share", post(handlers::share_post::<P, U, S>))
        .route("/{post_id}", delete(handlers::delete_post::<P, U, S>))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .with_state(state)
}
