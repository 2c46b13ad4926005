//! Trip invitation join flow.
//!
//! Redeems an invite token into a trip membership for the signed-in identity:
//!
//! ```text
//! checking ──► needs_login | invalid_link | error
//!     │
//!     └──► joining ──► joined
//! ```
//!
//! Every collaborator is injected, so the flow never reads ambient session
//! state. A run is a single attempt: each collaborator call is awaited in
//! sequence and any failure is terminal for that run.

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::invite::{InviteStatus, TripInvite};
use crate::models::membership::{MemberRole, MembershipStatus, TripMembership};
use crate::models::trip::trip_view_path;
use crate::models::user::Identity;
use shared::crypto::is_well_formed_token;
use shared::validation::emails_match;

/// Delay before a client follows the redirect after joining.
pub const DEFAULT_REDIRECT_DELAY: Duration = Duration::from_millis(1500);

// ============================================================================
// Collaborators
// ============================================================================

/// Failure of a backing service (database, identity provider, ...).
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    #[error("Unexpected response: {0}")]
    Unexpected(String),
}

/// Resolves who is making the request.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Returns `Ok(None)` when nobody is signed in.
    async fn current_identity(&self) -> Result<Option<Identity>, StoreError>;
}

/// Invite records addressed by token.
#[async_trait]
pub trait InviteStore: Send + Sync {
    async fn find_by_token(&self, token: &str) -> Result<Option<TripInvite>, StoreError>;

    async fn mark_accepted(&self, token: &str) -> Result<(), StoreError>;
}

/// Membership rows keyed by (trip, user).
#[async_trait]
pub trait MembershipStore: Send + Sync {
    async fn find_memberships(
        &self,
        trip_id: Uuid,
        user_id: Uuid,
    ) -> Result<Vec<TripMembership>, StoreError>;

    /// Insert or overwrite the (trip, user) row with the given role and status.
    async fn upsert_membership(
        &self,
        trip_id: Uuid,
        user_id: Uuid,
        role: MemberRole,
        status: MembershipStatus,
    ) -> Result<(), StoreError>;
}

/// Receives every state the flow enters, in order.
pub trait JoinObserver: Send + Sync {
    fn on_transition(&self, state: &JoinState);
}

// ============================================================================
// States
// ============================================================================

/// Why a link cannot be used at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidLinkReason {
    MissingToken,
    NotFound,
}

/// Terminal failures of the join flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinError {
    #[error("This invite is no longer active ({status})")]
    InactiveInvite { status: InviteStatus },

    #[error("Could not verify your sign-in: {0}")]
    IdentityLookupFailure(String),

    #[error("Your account has no email address, so the invite cannot be matched to it")]
    MissingEmail,

    #[error("This invite was sent to {expected}, but you are signed in as {actual}")]
    EmailMismatch { expected: String, actual: String },

    #[error("Could not load the invite: {0}")]
    InviteLookupFailure(String),

    #[error("Could not check your trip membership: {0}")]
    MembershipLookupFailure(String),

    #[error("Could not add you to the trip: {0}")]
    MembershipWriteFailure(String),
}

impl JoinError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            JoinError::InactiveInvite { .. } => "inactive_invite",
            JoinError::IdentityLookupFailure(_) => "identity_lookup_failure",
            JoinError::MissingEmail => "missing_email",
            JoinError::EmailMismatch { .. } => "email_mismatch",
            JoinError::InviteLookupFailure(_) => "invite_lookup_failure",
            JoinError::MembershipLookupFailure(_) => "membership_lookup_failure",
            JoinError::MembershipWriteFailure(_) => "membership_write_failure",
        }
    }
}

/// Tells the caller where to navigate once the join is complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectEvent {
    pub path: String,
    pub after: Duration,
}

/// States of a join-flow run. Each variant carries only its own data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinState {
    Checking,
    /// Recoverable: run again after the caller signs in.
    NeedsLogin,
    InvalidLink {
        reason: InvalidLinkReason,
    },
    Error {
        error: JoinError,
    },
    Joining {
        trip_id: Uuid,
    },
    Joined {
        trip_id: Uuid,
        already_member: bool,
        redirect: RedirectEvent,
    },
}

impl JoinState {
    pub fn name(&self) -> &'static str {
        match self {
            JoinState::Checking => "checking",
            JoinState::NeedsLogin => "needs_login",
            JoinState::InvalidLink { .. } => "invalid_link",
            JoinState::Error { .. } => "error",
            JoinState::Joining { .. } => "joining",
            JoinState::Joined { .. } => "joined",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, JoinState::Checking | JoinState::Joining { .. })
    }

    /// Human-readable message for the state.
    pub fn message(&self) -> String {
        match self {
            JoinState::Checking => "Checking your invite...".to_string(),
            JoinState::NeedsLogin => "Please sign in to accept this invite.".to_string(),
            JoinState::InvalidLink {
                reason: InvalidLinkReason::MissingToken,
            } => "This invite link is missing its token.".to_string(),
            JoinState::InvalidLink {
                reason: InvalidLinkReason::NotFound,
            } => "This invite link is invalid or could not be found.".to_string(),
            JoinState::Error { error } => error.to_string(),
            JoinState::Joining { .. } => "Joining the trip...".to_string(),
            JoinState::Joined {
                already_member: true,
                ..
            } => "You are already a member of this trip.".to_string(),
            JoinState::Joined { .. } => "You have joined the trip!".to_string(),
        }
    }

    fn failed(error: JoinError) -> Self {
        JoinState::Error { error }
    }
}

/// JSON view of a join-flow state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct JoinResponse {
    pub state: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trip_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub already_member: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_after_ms: Option<u64>,
}

impl From<&JoinState> for JoinResponse {
    fn from(state: &JoinState) -> Self {
        let mut response = JoinResponse {
            state: state.name(),
            message: state.message(),
            code: None,
            trip_id: None,
            already_member: None,
            redirect_to: None,
            redirect_after_ms: None,
        };

        match state {
            JoinState::Error { error } => response.code = Some(error.code()),
            JoinState::Joining { trip_id } => response.trip_id = Some(*trip_id),
            JoinState::Joined {
                trip_id,
                already_member,
                redirect,
            } => {
                response.trip_id = Some(*trip_id);
                response.already_member = Some(*already_member);
                response.redirect_to = Some(redirect.path.clone());
                response.redirect_after_ms = Some(redirect.after.as_millis() as u64);
            }
            _ => {}
        }

        response
    }
}

// ============================================================================
// Controller
// ============================================================================

/// Tunables for the join flow.
#[derive(Debug, Clone)]
pub struct JoinFlowConfig {
    pub redirect_delay: Duration,
}

impl Default for JoinFlowConfig {
    fn default() -> Self {
        Self {
            redirect_delay: DEFAULT_REDIRECT_DELAY,
        }
    }
}

/// The join-flow controller for a single request.
pub struct JoinFlow<'a> {
    identity: &'a dyn IdentityResolver,
    invites: &'a dyn InviteStore,
    memberships: &'a dyn MembershipStore,
    config: JoinFlowConfig,
    observer: Option<&'a dyn JoinObserver>,
}

impl<'a> JoinFlow<'a> {
    pub fn new(
        identity: &'a dyn IdentityResolver,
        invites: &'a dyn InviteStore,
        memberships: &'a dyn MembershipStore,
    ) -> Self {
        Self {
            identity,
            invites,
            memberships,
            config: JoinFlowConfig::default(),
            observer: None,
        }
    }

    pub fn with_config(mut self, config: JoinFlowConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_observer(mut self, observer: &'a dyn JoinObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Runs the flow from `checking` to a terminal state.
    pub async fn run(&self, token: Option<&str>) -> JoinState {
        self.enter(&JoinState::Checking);
        let state = self.redeem(token).await;
        self.enter(&state);
        state
    }

    async fn redeem(&self, token: Option<&str>) -> JoinState {
        let token = match token.map(str::trim).filter(|t| !t.is_empty()) {
            Some(token) => token,
            None => {
                return JoinState::InvalidLink {
                    reason: InvalidLinkReason::MissingToken,
                }
            }
        };

        let identity = match self.identity.current_identity().await {
            Ok(Some(identity)) => identity,
            Ok(None) => return JoinState::NeedsLogin,
            Err(e) => return JoinState::failed(JoinError::IdentityLookupFailure(e.to_string())),
        };

        // A token outside the link alphabet cannot exist in the store.
        let invite = if is_well_formed_token(token) {
            match self.invites.find_by_token(token).await {
                Ok(invite) => invite,
                Err(e) => return JoinState::failed(JoinError::InviteLookupFailure(e.to_string())),
            }
        } else {
            None
        };

        let invite = match invite {
            Some(invite) => invite,
            None => {
                return JoinState::InvalidLink {
                    reason: InvalidLinkReason::NotFound,
                }
            }
        };

        let status = invite.effective_status(Utc::now());
        if status.is_inactive() {
            return JoinState::failed(JoinError::InactiveInvite { status });
        }

        let actual_email = match identity.email.as_deref() {
            Some(email) if !email.trim().is_empty() => email,
            _ => return JoinState::failed(JoinError::MissingEmail),
        };
        if !emails_match(&invite.invited_email, actual_email) {
            return JoinState::failed(JoinError::EmailMismatch {
                expected: invite.invited_email.clone(),
                actual: actual_email.to_string(),
            });
        }

        let existing = match self
            .memberships
            .find_memberships(invite.trip_id, identity.id)
            .await
        {
            Ok(rows) => rows,
            Err(e) => {
                return JoinState::failed(JoinError::MembershipLookupFailure(e.to_string()))
            }
        };

        if !existing.is_empty() {
            debug!(
                trip_id = %invite.trip_id,
                user_id = %identity.id,
                "Invite redeemed by existing member"
            );
            return self.joined(invite.trip_id, true);
        }

        self.enter(&JoinState::Joining {
            trip_id: invite.trip_id,
        });

        if let Err(e) = self
            .memberships
            .upsert_membership(
                invite.trip_id,
                identity.id,
                invite.role,
                MembershipStatus::Accepted,
            )
            .await
        {
            return JoinState::failed(JoinError::MembershipWriteFailure(e.to_string()));
        }

        // Membership is already granted; a failed bookkeeping write leaves the
        // invite pending and is not surfaced.
        if let Err(e) = self.invites.mark_accepted(token).await {
            warn!(
                invite_id = %invite.id,
                trip_id = %invite.trip_id,
                error = %e,
                "Failed to mark invite accepted"
            );
        }

        info!(
            trip_id = %invite.trip_id,
            user_id = %identity.id,
            role = %invite.role,
            "User joined trip via invite"
        );

        self.joined(invite.trip_id, false)
    }

    fn joined(&self, trip_id: Uuid, already_member: bool) -> JoinState {
        JoinState::Joined {
            trip_id,
            already_member,
            redirect: RedirectEvent {
                path: trip_view_path(trip_id),
                after: self.config.redirect_delay,
            },
        }
    }

    fn enter(&self, state: &JoinState) {
        if let Some(observer) = self.observer {
            observer.on_transition(state);
        }
    }
}
