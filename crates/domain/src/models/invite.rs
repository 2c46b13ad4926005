//! Trip invite domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use super::membership::MemberRole;

/// Lifecycle status of an invite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InviteStatus {
    Pending,
    Accepted,
    Cancelled,
    Expired,
}

impl InviteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InviteStatus::Pending => "pending",
            InviteStatus::Accepted => "accepted",
            InviteStatus::Cancelled => "cancelled",
            InviteStatus::Expired => "expired",
        }
    }

    /// Cancelled and expired invites can no longer be redeemed.
    pub fn is_inactive(&self) -> bool {
        matches!(self, InviteStatus::Cancelled | InviteStatus::Expired)
    }

    /// Status at `now` for an invite expiring at `expires_at`.
    pub fn at(self, expires_at: DateTime<Utc>, now: DateTime<Utc>) -> InviteStatus {
        match self {
            InviteStatus::Pending if expires_at <= now => InviteStatus::Expired,
            status => status,
        }
    }
}

impl FromStr for InviteStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(InviteStatus::Pending),
            "accepted" => Ok(InviteStatus::Accepted),
            "cancelled" => Ok(InviteStatus::Cancelled),
            "expired" => Ok(InviteStatus::Expired),
            _ => Err(format!("Invalid invite status: {}", s)),
        }
    }
}

impl fmt::Display for InviteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A token-addressable invitation for one email address to join one trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TripInvite {
    pub id: Uuid,
    pub token: String,
    pub trip_id: Uuid,
    pub invited_email: String,
    pub role: MemberRole,
    pub status: InviteStatus,
    pub invited_by: Uuid,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
}

impl TripInvite {
    /// Status as seen at `now`: a pending invite past its expiry is expired
    /// even before the expiry job has rewritten the row.
    pub fn effective_status(&self, now: DateTime<Utc>) -> InviteStatus {
        self.status.at(self.expires_at, now)
    }

    /// Whether the invite can still be redeemed at `now`.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        !self.effective_status(now).is_inactive()
    }
}

/// Default invite lifetime: one week.
pub const DEFAULT_INVITE_EXPIRY_HOURS: i64 = 168;

/// Request to invite someone to a trip.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateInviteRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Role granted on join (default: member).
    pub role: Option<MemberRole>,

    /// Hours until expiry (1-720, default: 168)
    #[validate(range(
        min = 1,
        max = 720,
        message = "expires_in_hours must be between 1 and 720"
    ))]
    pub expires_in_hours: Option<i64>,
}

/// Response after creating an invite.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CreateInviteResponse {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub token: String,
    pub invited_email: String,
    pub role: MemberRole,
    pub status: InviteStatus,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub join_url: String,
}

/// Summary of an invite for listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct InviteSummary {
    pub id: Uuid,
    pub invited_email: String,
    pub role: MemberRole,
    pub status: InviteStatus,
    pub invited_by: Uuid,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
}

impl From<TripInvite> for InviteSummary {
    fn from(invite: TripInvite) -> Self {
        Self {
            id: invite.id,
            invited_email: invite.invited_email,
            role: invite.role,
            status: invite.status,
            invited_by: invite.invited_by,
            expires_at: invite.expires_at,
            created_at: invite.created_at,
            accepted_at: invite.accepted_at,
        }
    }
}

/// Response for listing invites.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListInvitesResponse {
    pub data: Vec<InviteSummary>,
}

/// Public invite preview (GET /invites/:token without auth).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PublicInviteInfo {
    pub trip_title: String,
    pub role: MemberRole,
    pub status: InviteStatus,
    pub expires_at: DateTime<Utc>,
    pub is_active: bool,
}
