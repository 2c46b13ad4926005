//! Bearer-token authentication middleware.
//!
//! Access tokens are issued by the identity provider; this service only
//! verifies them with the provider's public key.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use shared::jwt::{extract_user_id, JwtConfig, JwtError};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;

/// Authenticated user information taken from a verified access token.
#[derive(Debug, Clone)]
pub struct UserAuth {
    /// User ID from the JWT subject claim.
    pub user_id: Uuid,
    /// JWT ID (jti) for log correlation.
    pub jti: String,
    /// Email asserted by the identity provider, if any.
    pub email: Option<String>,
    /// Display name asserted by the identity provider, if any.
    pub name: Option<String>,
}

impl UserAuth {
    /// Validates an access token and returns the caller's claims.
    pub fn validate(jwt_config: &JwtConfig, token: &str) -> Result<Self, JwtError> {
        let claims = jwt_config.validate_access_token(token)?;
        let user_id = extract_user_id(&claims)?;

        Ok(UserAuth {
            user_id,
            jti: claims.jti,
            email: claims.email,
            name: claims.name,
        })
    }
}

/// Returns the token part of an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Middleware that requires a valid access token.
///
/// The verified [`UserAuth`] is stored in request extensions for handlers.
pub async fn require_user_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(req.headers()) else {
        return ApiError::Unauthorized("Missing or invalid Authorization header".to_string())
            .into_response();
    };

    match UserAuth::validate(&state.jwt, token) {
        Ok(auth) => {
            req.extensions_mut().insert(auth);
            next.run(req).await
        }
        Err(e) => {
            tracing::debug!(error = %e, "Access token rejected");
            ApiError::Unauthorized("Invalid or expired token".to_string()).into_response()
        }
    }
}
