//! Trip membership domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Role within a trip. Invites carry the same role set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Owner,
    #[default]
    Member,
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Owner => "owner",
            MemberRole::Member => "member",
        }
    }

    /// Returns true if this role can invite people and manage invites.
    pub fn can_manage_invites(&self) -> bool {
        matches!(self, MemberRole::Owner)
    }
}

impl FromStr for MemberRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "owner" => Ok(MemberRole::Owner),
            "member" => Ok(MemberRole::Member),
            _ => Err(format!("Invalid member role: {}", s)),
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status of a membership row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
    Pending,
    Accepted,
}

impl MembershipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipStatus::Pending => "pending",
            MembershipStatus::Accepted => "accepted",
        }
    }
}

impl fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user's membership in a trip. Unique on (trip_id, user_id).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TripMembership {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub user_id: Uuid,
    pub role: MemberRole,
    pub status: MembershipStatus,
    pub joined_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TripMembership {
    pub fn is_accepted(&self) -> bool {
        self.status == MembershipStatus::Accepted
    }
}

/// Member entry for listing, joined with the user's profile.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MemberSummary {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub role: MemberRole,
    pub status: MembershipStatus,
    pub joined_at: DateTime<Utc>,
}

/// Response for listing trip members.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListMembersResponse {
    pub data: Vec<MemberSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_role_default_is_member() {
        assert_eq!(MemberRole::default(), MemberRole::Member);
    }

    #[test]
    fn test_member_role_from_str() {
        assert_eq!("owner".parse::<MemberRole>().unwrap(), MemberRole::Owner);
        assert_eq!("MEMBER".parse::<MemberRole>().unwrap(), MemberRole::Member);
        assert!("admin".parse::<MemberRole>().is_err());
    }

    #[test]
    fn test_member_role_permissions() {
        assert!(MemberRole::Owner.can_manage_invites());
        assert!(!MemberRole::Member.can_manage_invites());
    }

    #[test]
    fn test_role_and_status_serialization() {
        assert_eq!(
            serde_json::to_string(&MemberRole::Owner).unwrap(),
            "\"owner\""
        );
        assert_eq!(
            serde_json::to_string(&MembershipStatus::Accepted).unwrap(),
            "\"accepted\""
        );
    }

    #[test]
    fn test_is_accepted() {
        let now = Utc::now();
        let mut membership = TripMembership {
            id: Uuid::new_v4(),
            trip_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            role: MemberRole::Member,
            status: MembershipStatus::Pending,
            joined_at: now,
            updated_at: now,
        };
        assert!(!membership.is_accepted());
        membership.status = MembershipStatus::Accepted;
        assert!(membership.is_accepted());
    }
}
