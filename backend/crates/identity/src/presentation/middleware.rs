//! Auth Gateway Middleware
//!
//! Extracts the bearer token from `Authorization`, verifies it, resolves
//! the referenced user, and attaches the authenticated identity to the
//! request as a [`CurrentUser`] extension. Everything else is a 401.

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::application::token::TokenService;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::IdentityError;
use crate::presentation::handlers::IdentityAppState;

/// Authenticated identity attached to the request by [`require_bearer_auth`]
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub UserId);

/// Middleware that requires a valid bearer token referencing a live user
pub async fn require_bearer_auth<R>(
    State(state): State<IdentityAppState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| IdentityError::MissingToken.into_response())?;

    let user_id = TokenService::new(state.config.clone())
        .verify(token)
        .map_err(|e| e.into_response())?;

    // A structurally valid token can still reference a deleted account
    let user = match state.repo.find_by_id(&user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => return Err(IdentityError::InvalidToken.into_response()),
        Err(e) => return Err(e.into_response()),
    };

    req.extensions_mut().insert(CurrentUser(user.user_id));

    Ok(next.run(req).await)
}
