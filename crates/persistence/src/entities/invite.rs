//! Trip invite entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::invite::{InviteStatus, PublicInviteInfo};
use sqlx::FromRow;
use uuid::Uuid;

use super::membership::MemberRoleDb;

/// Database enum for invite_status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "invite_status", rename_all = "lowercase")]
pub enum InviteStatusDb {
    Pending,
    Accepted,
    Cancelled,
    Expired,
}

impl From<InviteStatusDb> for InviteStatus {
    fn from(db_status: InviteStatusDb) -> Self {
        match db_status {
            InviteStatusDb::Pending => InviteStatus::Pending,
            InviteStatusDb::Accepted => InviteStatus::Accepted,
            InviteStatusDb::Cancelled => InviteStatus::Cancelled,
            InviteStatusDb::Expired => InviteStatus::Expired,
        }
    }
}

impl From<InviteStatus> for InviteStatusDb {
    fn from(status: InviteStatus) -> Self {
        match status {
            InviteStatus::Pending => InviteStatusDb::Pending,
            InviteStatus::Accepted => InviteStatusDb::Accepted,
            InviteStatus::Cancelled => InviteStatusDb::Cancelled,
            InviteStatus::Expired => InviteStatusDb::Expired,
        }
    }
}

/// Database row mapping for the trip_invites table.
#[derive(Debug, Clone, FromRow)]
pub struct TripInviteEntity {
    pub id: Uuid,
    pub token: String,
    pub trip_id: Uuid,
    pub invited_email: String,
    pub role: MemberRoleDb,
    pub status: InviteStatusDb,
    pub invited_by: Uuid,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
}

impl From<TripInviteEntity> for domain::models::TripInvite {
    fn from(entity: TripInviteEntity) -> Self {
        Self {
            id: entity.id,
            token: entity.token,
            trip_id: entity.trip_id,
            invited_email: entity.invited_email,
            role: entity.role.into(),
            status: entity.status.into(),
            invited_by: entity.invited_by,
            expires_at: entity.expires_at,
            created_at: entity.created_at,
            accepted_at: entity.accepted_at,
        }
    }
}

/// Invite entity with trip info for the public preview.
#[derive(Debug, Clone, FromRow)]
pub struct InviteWithTripEntity {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub role: MemberRoleDb,
    pub status: InviteStatusDb,
    pub expires_at: DateTime<Utc>,
    // Trip info
    pub trip_title: String,
}

impl InviteWithTripEntity {
    /// Public preview as seen at `now`.
    pub fn into_public_info(self, now: DateTime<Utc>) -> PublicInviteInfo {
        let status = InviteStatus::from(self.status).at(self.expires_at, now);
        PublicInviteInfo {
            trip_title: self.trip_title,
            role: self.role.into(),
            status,
            expires_at: self.expires_at,
            is_active: !status.is_inactive(),
        }
    }
}
