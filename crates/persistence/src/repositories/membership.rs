//! Trip membership repository for database operations.

use async_trait::async_trait;
use domain::models::membership::{MemberRole, MembershipStatus};
use domain::models::TripMembership;
use domain::services::{MembershipStore, StoreError};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{MemberRoleDb, MemberWithUserEntity, MembershipStatusDb, TripMembershipEntity};
use crate::metrics::QueryTimer;
use crate::store_error;

/// Repository for membership-related database operations.
#[derive(Clone)]
pub struct MembershipRepository {
    pool: PgPool,
}

impl MembershipRepository {
    /// Creates a new MembershipRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a user's membership for a trip.
    pub async fn get_membership(
        &self,
        trip_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<TripMembershipEntity>, sqlx::Error> {
        let timer = QueryTimer::new("get_trip_membership");
        let result = sqlx::query_as::<_, TripMembershipEntity>(
            r#"
            SELECT id, trip_id, user_id, role, status, joined_at, updated_at
            FROM trip_memberships
            WHERE trip_id = $1 AND user_id = $2
            "#,
        )
        .bind(trip_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Insert the (trip, user) membership or overwrite its role and status.
    pub async fn upsert_membership(
        &self,
        trip_id: Uuid,
        user_id: Uuid,
        role: MemberRole,
        status: MembershipStatus,
    ) -> Result<TripMembershipEntity, sqlx::Error> {
        let timer = QueryTimer::new("upsert_trip_membership");
        let role_db: MemberRoleDb = role.into();
        let status_db: MembershipStatusDb = status.into();
        let result = sqlx::query_as::<_, TripMembershipEntity>(
            r#"
            INSERT INTO trip_memberships (trip_id, user_id, role, status)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (trip_id, user_id)
            DO UPDATE SET role = EXCLUDED.role, status = EXCLUDED.status, updated_at = NOW()
            RETURNING id, trip_id, user_id, role, status, joined_at, updated_at
            "#,
        )
        .bind(trip_id)
        .bind(user_id)
        .bind(role_db)
        .bind(status_db)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List members of a trip with their profile info.
    pub async fn list_members(
        &self,
        trip_id: Uuid,
    ) -> Result<Vec<MemberWithUserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_trip_members");
        let result = sqlx::query_as::<_, MemberWithUserEntity>(
            r#"
            SELECT
                m.user_id, m.role, m.status, m.joined_at,
                u.email, u.display_name
            FROM trip_memberships m
            LEFT JOIN users u ON m.user_id = u.id
            WHERE m.trip_id = $1
            ORDER BY m.joined_at ASC
            "#,
        )
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}

#[async_trait]
impl MembershipStore for MembershipRepository {
    async fn find_memberships(
        &self,
        trip_id: Uuid,
        user_id: Uuid,
    ) -> Result<Vec<TripMembership>, StoreError> {
        self.get_membership(trip_id, user_id)
            .await
            .map(|row| row.into_iter().map(Into::into).collect())
            .map_err(store_error)
    }

    async fn upsert_membership(
        &self,
        trip_id: Uuid,
        user_id: Uuid,
        role: MemberRole,
        status: MembershipStatus,
    ) -> Result<(), StoreError> {
        MembershipRepository::upsert_membership(self, trip_id, user_id, role, status)
            .await
            .map(|_| ())
            .map_err(store_error)
    }
}
