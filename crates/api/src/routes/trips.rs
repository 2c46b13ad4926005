//! Trip routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::membership::{ListMembersResponse, MemberRole};
use domain::models::trip::{CreateTripRequest, ListTripsResponse, TripResponse};
use domain::models::TripMembership;
use persistence::repositories::{MembershipRepository, NewTrip, TripRepository};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::middleware::metrics::record_trip_created;

/// Loads the caller's accepted membership, or 404 so non-members cannot
/// probe which trips exist.
pub(crate) async fn require_member(
    state: &AppState,
    trip_id: Uuid,
    user_id: Uuid,
) -> Result<TripMembership, ApiError> {
    MembershipRepository::new(state.pool.clone())
        .get_membership(trip_id, user_id)
        .await?
        .map(TripMembership::from)
        .filter(TripMembership::is_accepted)
        .ok_or_else(|| ApiError::NotFound("Trip not found or you are not a member".to_string()))
}

/// Like [`require_member`], but the membership must also allow managing invites.
pub(crate) async fn require_owner(
    state: &AppState,
    trip_id: Uuid,
    user_id: Uuid,
    action: &str,
) -> Result<TripMembership, ApiError> {
    let membership = require_member(state, trip_id, user_id).await?;
    if !membership.role.can_manage_invites() {
        return Err(ApiError::Forbidden(format!("Only trip owners can {}", action)));
    }
    Ok(membership)
}

/// Create a trip.
///
/// POST /api/v1/trips
///
/// The caller becomes the trip's owner.
pub async fn create_trip(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Json(request): Json<CreateTripRequest>,
) -> Result<(StatusCode, Json<TripResponse>), ApiError> {
    request.validate()?;
    request.validate_dates()?;

    let repo = TripRepository::new(state.pool.clone());
    let title = request.title.trim();
    let trip = repo
        .create_trip(NewTrip {
            title,
            description: request.description.as_deref(),
            start_date: request.start_date,
            end_date: request.end_date,
            created_by: user_auth.user_id,
        })
        .await?;

    record_trip_created();
    info!(
        trip_id = %trip.id,
        user_id = %user_auth.user_id,
        "Trip created"
    );

    Ok((
        StatusCode::CREATED,
        Json(TripResponse {
            trip: trip.into(),
            my_role: MemberRole::Owner,
            member_count: 1,
        }),
    ))
}

/// List trips the caller belongs to.
///
/// GET /api/v1/trips
pub async fn list_trips(
    State(state): State<AppState>,
    user_auth: UserAuth,
) -> Result<Json<ListTripsResponse>, ApiError> {
    let repo = TripRepository::new(state.pool.clone());
    let trips: Vec<TripResponse> = repo
        .list_for_user(user_auth.user_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    info!(
        user_id = %user_auth.user_id,
        trip_count = trips.len(),
        "Listed trips"
    );

    Ok(Json(ListTripsResponse { data: trips }))
}

/// Get a trip.
///
/// GET /api/v1/trips/:trip_id
pub async fn get_trip(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(trip_id): Path<Uuid>,
) -> Result<Json<TripResponse>, ApiError> {
    let repo = TripRepository::new(state.pool.clone());
    let trip = repo
        .find_trip_for_member(trip_id, user_auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Trip not found or you are not a member".to_string()))?;

    Ok(Json(trip.into()))
}

/// List the members of a trip.
///
/// GET /api/v1/trips/:trip_id/members
pub async fn list_members(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(trip_id): Path<Uuid>,
) -> Result<Json<ListMembersResponse>, ApiError> {
    require_member(&state, trip_id, user_auth.user_id).await?;

    let members = MembershipRepository::new(state.pool.clone())
        .list_members(trip_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(ListMembersResponse { data: members }))
}
