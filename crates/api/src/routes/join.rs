//! Invite redemption.
//!
//! Runs the join flow for the caller and returns its terminal state. The body
//! is always the tagged state; the status code mirrors the outcome.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::services::{JoinError, JoinFlow, JoinFlowConfig, JoinResponse, JoinState};
use persistence::repositories::{InviteRepository, MembershipRepository, UserRepository};

use crate::app::AppState;
use crate::extractors::OptionalUserAuth;
use crate::services::{RequestIdentityResolver, TracingJoinObserver};

/// HTTP status for a terminal join state.
pub fn join_status(state: &JoinState) -> StatusCode {
    match state {
        JoinState::Joined { .. } => StatusCode::OK,
        JoinState::NeedsLogin => StatusCode::UNAUTHORIZED,
        JoinState::InvalidLink { .. } => StatusCode::NOT_FOUND,
        JoinState::Error { error } => match error {
            JoinError::InactiveInvite { .. } => StatusCode::GONE,
            JoinError::MissingEmail | JoinError::EmailMismatch { .. } => StatusCode::FORBIDDEN,
            JoinError::IdentityLookupFailure(_)
            | JoinError::InviteLookupFailure(_)
            | JoinError::MembershipLookupFailure(_)
            | JoinError::MembershipWriteFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        },
        // Not terminal; run() never returns these
        JoinState::Checking | JoinState::Joining { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

async fn run_join(
    state: &AppState,
    auth: OptionalUserAuth,
    token: Option<&str>,
) -> (StatusCode, Json<JoinResponse>) {
    let identity =
        RequestIdentityResolver::new(auth.0, UserRepository::new(state.pool.clone()));
    let invites = InviteRepository::new(state.pool.clone());
    let memberships = MembershipRepository::new(state.pool.clone());
    let observer = TracingJoinObserver;

    let outcome = JoinFlow::new(&identity, &invites, &memberships)
        .with_config(JoinFlowConfig {
            redirect_delay: state.config.join.redirect_delay(),
        })
        .with_observer(&observer)
        .run(token)
        .await;

    (join_status(&outcome), Json(JoinResponse::from(&outcome)))
}

/// Redeem an invite.
///
/// POST /api/v1/join/:token
///
/// Authentication is optional here: an anonymous caller gets `needs_login`
/// and can retry after signing in.
pub async fn join_trip(
    State(state): State<AppState>,
    auth: OptionalUserAuth,
    Path(token): Path<String>,
) -> (StatusCode, Json<JoinResponse>) {
    run_join(&state, auth, Some(&token)).await
}

/// Join link opened without a token.
///
/// POST /api/v1/join
pub async fn join_without_token(
    State(state): State<AppState>,
    auth: OptionalUserAuth,
) -> (StatusCode, Json<JoinResponse>) {
    run_join(&state, auth, None).await
}
