//! Invite routes for managing trip invitations.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{Duration, Utc};
use domain::models::invite::{
    CreateInviteRequest, CreateInviteResponse, InviteSummary, ListInvitesResponse,
    PublicInviteInfo, DEFAULT_INVITE_EXPIRY_HOURS,
};
use domain::models::TripInvite;
use persistence::repositories::InviteRepository;
use shared::crypto::{generate_invite_token, is_well_formed_token};
use shared::validation::normalize_email;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::middleware::metrics::record_invite_created;
use crate::routes::trips::require_owner;

/// Create a new invite for a trip.
///
/// POST /api/v1/trips/:trip_id/invites
///
/// Only owners can invite. The response carries the join link to share.
pub async fn create_invite(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(trip_id): Path<Uuid>,
    Json(request): Json<CreateInviteRequest>,
) -> Result<(StatusCode, Json<CreateInviteResponse>), ApiError> {
    request.validate()?;

    require_owner(&state, trip_id, user_auth.user_id, "create invites").await?;

    let invite_repo = InviteRepository::new(state.pool.clone());
    let token = invite_repo
        .generate_unique_token(generate_invite_token)
        .await?;

    let expires_in_hours = request
        .expires_in_hours
        .unwrap_or(DEFAULT_INVITE_EXPIRY_HOURS);
    let expires_at = Utc::now() + Duration::hours(expires_in_hours);
    let invited_email = normalize_email(&request.email);

    let invite: TripInvite = invite_repo
        .create_invite(
            trip_id,
            &token,
            &invited_email,
            request.role.unwrap_or_default(),
            expires_at,
            user_auth.user_id,
        )
        .await?
        .into();

    record_invite_created();
    info!(
        trip_id = %trip_id,
        invite_id = %invite.id,
        role = %invite.role,
        user_id = %user_auth.user_id,
        "Invite created"
    );

    let join_url = state.config.join_url(&invite.token);

    Ok((
        StatusCode::CREATED,
        Json(CreateInviteResponse {
            id: invite.id,
            trip_id: invite.trip_id,
            token: invite.token,
            invited_email: invite.invited_email,
            role: invite.role,
            status: invite.status,
            expires_at: invite.expires_at,
            created_at: invite.created_at,
            join_url,
        }),
    ))
}

/// List all invites of a trip, newest first.
///
/// GET /api/v1/trips/:trip_id/invites
pub async fn list_invites(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(trip_id): Path<Uuid>,
) -> Result<Json<ListInvitesResponse>, ApiError> {
    require_owner(&state, trip_id, user_auth.user_id, "view invites").await?;

    let invites: Vec<InviteSummary> = InviteRepository::new(state.pool.clone())
        .list_for_trip(trip_id)
        .await?
        .into_iter()
        .map(|entity| InviteSummary::from(TripInvite::from(entity)))
        .collect();

    info!(
        trip_id = %trip_id,
        user_id = %user_auth.user_id,
        invite_count = invites.len(),
        "Listed invites"
    );

    Ok(Json(ListInvitesResponse { data: invites }))
}

/// Cancel a pending invite.
///
/// DELETE /api/v1/trips/:trip_id/invites/:invite_id
pub async fn cancel_invite(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path((trip_id, invite_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    require_owner(&state, trip_id, user_auth.user_id, "cancel invites").await?;

    let invite_repo = InviteRepository::new(state.pool.clone());
    let invite = invite_repo
        .find_by_id(invite_id)
        .await?
        .filter(|invite| invite.trip_id == trip_id)
        .ok_or_else(|| ApiError::NotFound("Invite not found".to_string()))?;

    // Only pending invites can be cancelled
    if invite_repo.cancel_invite(invite.id).await? == 0 {
        return Err(ApiError::NotFound("Invite not found".to_string()));
    }

    info!(
        trip_id = %trip_id,
        invite_id = %invite_id,
        user_id = %user_auth.user_id,
        "Invite cancelled"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// Get invite preview by token (public, no auth required).
///
/// GET /api/v1/invites/:token
///
/// Never reveals the invited email address.
pub async fn get_invite_info(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<PublicInviteInfo>, ApiError> {
    if !is_well_formed_token(&token) {
        return Err(ApiError::NotFound("Invite not found".to_string()));
    }

    let invite = InviteRepository::new(state.pool.clone())
        .find_by_token_with_trip(&token)
        .await?
        .ok_or_else(|| ApiError::NotFound("Invite not found".to_string()))?;

    Ok(Json(invite.into_public_info(Utc::now())))
}
