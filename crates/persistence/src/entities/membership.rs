//! Trip membership entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::membership::{MemberRole, MembershipStatus};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for member_role that maps to PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "member_role", rename_all = "lowercase")]
pub enum MemberRoleDb {
    Owner,
    Member,
}

impl From<MemberRoleDb> for MemberRole {
    fn from(db_role: MemberRoleDb) -> Self {
        match db_role {
            MemberRoleDb::Owner => MemberRole::Owner,
            MemberRoleDb::Member => MemberRole::Member,
        }
    }
}

impl From<MemberRole> for MemberRoleDb {
    fn from(role: MemberRole) -> Self {
        match role {
            MemberRole::Owner => MemberRoleDb::Owner,
            MemberRole::Member => MemberRoleDb::Member,
        }
    }
}

/// Database enum for membership_status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "membership_status", rename_all = "lowercase")]
pub enum MembershipStatusDb {
    Pending,
    Accepted,
}

impl From<MembershipStatusDb> for MembershipStatus {
    fn from(db_status: MembershipStatusDb) -> Self {
        match db_status {
            MembershipStatusDb::Pending => MembershipStatus::Pending,
            MembershipStatusDb::Accepted => MembershipStatus::Accepted,
        }
    }
}

impl From<MembershipStatus> for MembershipStatusDb {
    fn from(status: MembershipStatus) -> Self {
        match status {
            MembershipStatus::Pending => MembershipStatusDb::Pending,
            MembershipStatus::Accepted => MembershipStatusDb::Accepted,
        }
    }
}

/// Database row mapping for the trip_memberships table.
#[derive(Debug, Clone, FromRow)]
pub struct TripMembershipEntity {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub user_id: Uuid,
    pub role: MemberRoleDb,
    pub status: MembershipStatusDb,
    pub joined_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TripMembershipEntity> for domain::models::TripMembership {
    fn from(entity: TripMembershipEntity) -> Self {
        Self {
            id: entity.id,
            trip_id: entity.trip_id,
            user_id: entity.user_id,
            role: entity.role.into(),
            status: entity.status.into(),
            joined_at: entity.joined_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Member entity with user info for listing members.
#[derive(Debug, Clone, FromRow)]
pub struct MemberWithUserEntity {
    pub user_id: Uuid,
    pub role: MemberRoleDb,
    pub status: MembershipStatusDb,
    pub joined_at: DateTime<Utc>,
    // User fields
    pub email: Option<String>,
    pub display_name: Option<String>,
}

impl From<MemberWithUserEntity> for domain::models::membership::MemberSummary {
    fn from(entity: MemberWithUserEntity) -> Self {
        Self {
            user_id: entity.user_id,
            email: entity.email,
            display_name: entity.display_name,
            role: entity.role.into(),
            status: entity.status.into(),
            joined_at: entity.joined_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [MemberRole::Owner, MemberRole::Member] {
            let db: MemberRoleDb = role.into();
            assert_eq!(MemberRole::from(db), role);
        }
    }

    #[test]
    fn test_status_conversion() {
        assert_eq!(
            MembershipStatus::from(MembershipStatusDb::Accepted),
            MembershipStatus::Accepted
        );
        assert_eq!(
            MembershipStatusDb::from(MembershipStatus::Pending),
            MembershipStatusDb::Pending
        );
    }
}
