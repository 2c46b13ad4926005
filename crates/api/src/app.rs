use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use shared::jwt::{JwtConfig, JwtError};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, require_user_auth, security_headers_middleware,
    with_request_tracing,
};
use crate::routes::{health, invites, join, trips, users};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    /// Verifier for identity-provider access tokens
    pub jwt: Arc<JwtConfig>,
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.security.cors_origins.is_empty() {
        // Development: allow any origin
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Builds the router. Fails only when the configured JWT public key is unusable.
pub fn create_app(config: Config, pool: PgPool) -> Result<Router, JwtError> {
    let jwt = JwtConfig::verifier(&config.jwt.public_key, config.jwt.leeway_secs)?;
    let cors = cors_layer(&config);
    let request_timeout = Duration::from_secs(config.server.request_timeout_secs);

    let state = AppState {
        pool,
        config: Arc::new(config),
        jwt: Arc::new(jwt),
    };

    // Routes requiring a valid access token
    let protected_routes = Router::new()
        .route(
            "/api/v1/trips",
            post(trips::create_trip).get(trips::list_trips),
        )
        .route("/api/v1/trips/:trip_id", get(trips::get_trip))
        .route("/api/v1/trips/:trip_id/members", get(trips::list_members))
        .route(
            "/api/v1/trips/:trip_id/invites",
            post(invites::create_invite).get(invites::list_invites),
        )
        .route(
            "/api/v1/trips/:trip_id/invites/:invite_id",
            delete(invites::cancel_invite),
        )
        .route(
            "/api/v1/users/me",
            get(users::get_current_user).put(users::sync_current_user),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_user_auth,
        ));

    // Join routes resolve identity themselves so anonymous callers get a
    // needs_login state instead of a bare 401
    let join_routes = Router::new()
        .route("/api/v1/join", post(join::join_without_token))
        .route("/api/v1/join/:token", post(join::join_trip))
        .route("/api/v1/invites/:token", get(invites::get_invite_info));

    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    let router = Router::new()
        .merge(public_routes)
        .merge(join_routes)
        .merge(protected_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            security_headers_middleware,
        ))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(middleware::from_fn(metrics_middleware));

    Ok(with_request_tracing(router).layer(cors).with_state(state))
}
