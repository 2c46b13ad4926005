//! Trip entity (database row mapping).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::membership::MemberRoleDb;

/// Database row mapping for the trips table.
#[derive(Debug, Clone, FromRow)]
pub struct TripEntity {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TripEntity> for domain::models::Trip {
    fn from(entity: TripEntity) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            description: entity.description,
            start_date: entity.start_date,
            end_date: entity.end_date,
            created_by: entity.created_by,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Trip joined with the requesting user's membership and a member count.
#[derive(Debug, Clone, FromRow)]
pub struct TripWithMembershipEntity {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    // Membership fields
    pub role: MemberRoleDb,
    // Aggregates
    pub member_count: i64,
}

impl From<TripWithMembershipEntity> for domain::models::trip::TripResponse {
    fn from(entity: TripWithMembershipEntity) -> Self {
        Self {
            trip: domain::models::Trip {
                id: entity.id,
                title: entity.title,
                description: entity.description,
                start_date: entity.start_date,
                end_date: entity.end_date,
                created_by: entity.created_by,
                created_at: entity.created_at,
                updated_at: entity.updated_at,
            },
            my_role: entity.role.into(),
            member_count: entity.member_count,
        }
    }
}
