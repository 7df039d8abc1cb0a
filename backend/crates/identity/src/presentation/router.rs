//! Identity Router

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::IdentityConfig;
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgUserRepository;
use crate::presentation::handlers::{self, IdentityAppState};
use crate::presentation::middleware::require_bearer_auth;

/// Create the Identity router with PostgreSQL repository
pub fn identity_router(repo: PgUserRepository, config: IdentityConfig) -> Router {
    identity_router_generic(repo, config)
}

/// Create a generic Identity router for any repository implementation
pub fn identity_router_generic<R>(repo: R, config: IdentityConfig) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let state = IdentityAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    let protected = Router::new()
        .route("/profile", get(handlers::profile::<R>))
        .route("/biometric", post(handlers::register_biometric::<R>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_bearer_auth::<R>,
        ));

    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .merge(protected)
        .with_state(state)
}
