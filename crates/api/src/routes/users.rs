//! Profile routes for the signed-in user.

use axum::{extract::State, Json};
use domain::models::User;
use persistence::repositories::UserRepository;
use shared::validation::normalize_email;
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;

/// Get the caller's stored profile.
///
/// GET /api/v1/users/me
pub async fn get_current_user(
    State(state): State<AppState>,
    user_auth: UserAuth,
) -> Result<Json<User>, ApiError> {
    let user = UserRepository::new(state.pool.clone())
        .find_by_id(user_auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Profile not synced yet".to_string()))?;

    Ok(Json(user.into()))
}

/// Mirror the caller's identity-provider profile.
///
/// PUT /api/v1/users/me
///
/// Copies the email and name claims of the verified access token; the
/// request has no body.
pub async fn sync_current_user(
    State(state): State<AppState>,
    user_auth: UserAuth,
) -> Result<Json<User>, ApiError> {
    let email = user_auth
        .email
        .as_deref()
        .map(normalize_email)
        .filter(|e| !e.is_empty());
    let display_name = user_auth
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());

    let user: User = UserRepository::new(state.pool.clone())
        .upsert_profile(user_auth.user_id, email.as_deref(), display_name)
        .await?
        .into();

    info!(
        user_id = %user.id,
        has_email = user.email.is_some(),
        "User profile synced"
    );

    Ok(Json(user))
}
