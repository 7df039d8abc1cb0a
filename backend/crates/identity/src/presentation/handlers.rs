//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Extension;
use std::sync::Arc;

use crate::application::config::IdentityConfig;
use crate::application::{
    GetProfileUseCase, LoginInput, LoginUseCase, RegisterBiometricUseCase, RegisterInput,
    RegisterUseCase,
};
use crate::domain::repository::UserRepository;
use crate::error::IdentityResult;
use crate::presentation::dto::{
    AuthResponse, BiometricRequest, LoginRequest, RegisterRequest, UserEnvelopeResponse,
    UserResponse,
};
use crate::presentation::middleware::CurrentUser;

/// Shared state for identity handlers
#[derive(Clone)]
pub struct IdentityAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<IdentityConfig>,
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
pub async fn register<R>(
    State(state): State<IdentityAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> IdentityResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let input = RegisterInput {
        email: req.email.unwrap_or_default(),
        password: req.password.unwrap_or_default(),
        name: req.name.unwrap_or_default(),
        username: req.username.unwrap_or_default(),
    };

    let output = use_case.execute(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            success: true,
            token: output.token,
            user: UserResponse::from(&output.user),
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<IdentityAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> IdentityResult<Json<AuthResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.config.clone());

    let input = LoginInput {
        email: req.email.unwrap_or_default(),
        password: req.password.unwrap_or_default(),
    };

    let output = use_case.execute(input).await?;

    Ok(Json(AuthResponse {
        success: true,
        token: output.token,
        user: UserResponse::from(&output.user),
    }))
}

// ============================================================================
// Profile
// ============================================================================

/// GET /api/auth/profile
pub async fn profile<R>(
    State(state): State<IdentityAppState<R>>,
    Extension(current): Extension<CurrentUser>,
) -> IdentityResult<Json<UserEnvelopeResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = GetProfileUseCase::new(state.repo.clone());

    let user = use_case.execute(&current.0).await?;

    Ok(Json(UserEnvelopeResponse {
        success: true,
        user: UserResponse::from(&user),
    }))
}

// ============================================================================
// Biometric
// ============================================================================

/// POST /api/auth/biometric
pub async fn register_biometric<R>(
    State(state): State<IdentityAppState<R>>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<BiometricRequest>,
) -> IdentityResult<Json<UserEnvelopeResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterBiometricUseCase::new(state.repo.clone());

    let public_key = req.public_key.unwrap_or_default();
    let user = use_case.execute(&current.0, &public_key).await?;

    Ok(Json(UserEnvelopeResponse {
        success: true,
        user: UserResponse::from(&user),
    }))
}
