//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.
//!
//! A missing `TOKEN_SECRET` or `DATABASE_URL` halts startup deliberately:
//! a server that cannot sign tokens must never enter its serving state.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router, http,
    http::{Method, header},
    middleware,
    routing::get,
};
use base64::Engine;
use base64::engine::general_purpose;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer, ExposeHeaders};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use feed::PgPostRepository;
use feed::presentation::router::feed_router_generic;
use identity::presentation::handlers::IdentityAppState;
use identity::presentation::middleware::require_bearer_auth;
use identity::presentation::router::identity_router_generic;
use identity::{IdentityConfig, PgUserRepository};
use platform::storage::DiskMediaStorage;

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,identity=info,feed=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Token signing secret is a startup precondition (fail-fast)
    let secret_b64 = env::var("TOKEN_SECRET").expect("TOKEN_SECRET must be set in environment");
    let secret_bytes = Engine::decode(&general_purpose::STANDARD, &secret_b64)?;
    anyhow::ensure!(
        secret_bytes.len() == 32,
        "TOKEN_SECRET must decode to exactly 32 bytes"
    );
    let mut token_secret = [0u8; 32];
    token_secret.copy_from_slice(&secret_bytes);

    let password_pepper = match env::var("PASSWORD_PEPPER") {
        Ok(b64) => Some(Engine::decode(&general_purpose::STANDARD, &b64)?),
        Err(_) => None,
    };

    let identity_config = IdentityConfig {
        token_secret,
        password_pepper,
        ..Default::default()
    };

    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5002);

    // Media storage: local disk, served under /uploads
    let media_root = env::var("MEDIA_ROOT").unwrap_or_else(|_| "uploads".to_string());
    let public_base =
        env::var("PUBLIC_BASE_URL").unwrap_or_else(|_| format!("http://localhost:{port}"));
    let storage = DiskMediaStorage::new(media_root.clone(), public_base);

    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
    let post_repo = Arc::new(PgPostRepository::new(pool.clone()));

    // The feed routes share the identity state so the bearer-auth
    // middleware resolves users against the same repository
    let auth_state = IdentityAppState {
        repo: user_repo.clone(),
        config: Arc::new(identity_config.clone()),
    };

    let feed_routes =
        feed_router_generic(post_repo, user_repo.clone(), Arc::new(storage)).route_layer(
            middleware::from_fn_with_state(
                auth_state.clone(),
                require_bearer_auth::<PgUserRepository>,
            ),
        );

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .expose_headers(ExposeHeaders::list([header::AUTHORIZATION]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .nest(
            "/api/auth",
            identity_router_generic((*user_repo).clone(), identity_config),
        )
        .nest("/api/users", feed_routes)
        .route("/api/health", get(health))
        .nest_service("/uploads", ServeDir::new(media_root))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// GET /api/health
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "OK",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
