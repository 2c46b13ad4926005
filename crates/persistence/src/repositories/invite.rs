//! Invite repository for database operations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::models::membership::MemberRole;
use domain::models::TripInvite;
use domain::services::{InviteStore, StoreError};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{InviteStatusDb, InviteWithTripEntity, MemberRoleDb, TripInviteEntity};
use crate::metrics::QueryTimer;
use crate::store_error;

const INVITE_COLUMNS: &str = "id, token, trip_id, invited_email, role, status, invited_by, expires_at, created_at, accepted_at";

/// Repository for invite-related database operations.
#[derive(Clone)]
pub struct InviteRepository {
    pool: PgPool,
}

impl InviteRepository {
    /// Creates a new InviteRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new pending invite.
    pub async fn create_invite(
        &self,
        trip_id: Uuid,
        token: &str,
        invited_email: &str,
        role: MemberRole,
        expires_at: DateTime<Utc>,
        invited_by: Uuid,
    ) -> Result<TripInviteEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_invite");
        let role_db: MemberRoleDb = role.into();
        let result = sqlx::query_as::<_, TripInviteEntity>(&format!(
            r#"
            INSERT INTO trip_invites (trip_id, token, invited_email, role, expires_at, invited_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {INVITE_COLUMNS}
            "#
        ))
        .bind(trip_id)
        .bind(token)
        .bind(invited_email)
        .bind(role_db)
        .bind(expires_at)
        .bind(invited_by)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find invite by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<TripInviteEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_invite_by_id");
        let result = sqlx::query_as::<_, TripInviteEntity>(&format!(
            "SELECT {INVITE_COLUMNS} FROM trip_invites WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find invite by token, whatever its status.
    pub async fn find_by_token(
        &self,
        token: &str,
    ) -> Result<Option<TripInviteEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_invite_by_token");
        let result = sqlx::query_as::<_, TripInviteEntity>(&format!(
            "SELECT {INVITE_COLUMNS} FROM trip_invites WHERE token = $1"
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find invite by token with trip info (for public preview).
    pub async fn find_by_token_with_trip(
        &self,
        token: &str,
    ) -> Result<Option<InviteWithTripEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_invite_by_token_with_trip");
        let result = sqlx::query_as::<_, InviteWithTripEntity>(
            r#"
            SELECT
                i.id, i.trip_id, i.role, i.status, i.expires_at,
                t.title as trip_title
            FROM trip_invites i
            JOIN trips t ON i.trip_id = t.id
            WHERE i.token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List all invites of a trip, newest first.
    pub async fn list_for_trip(&self, trip_id: Uuid) -> Result<Vec<TripInviteEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_trip_invites");
        let result = sqlx::query_as::<_, TripInviteEntity>(&format!(
            r#"
            SELECT {INVITE_COLUMNS}
            FROM trip_invites
            WHERE trip_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Cancel a pending invite. Returns the number of rows changed.
    pub async fn cancel_invite(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("cancel_invite");
        let result = sqlx::query(
            r#"
            UPDATE trip_invites
            SET status = 'cancelled'
            WHERE id = $1 AND status = 'pending'
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Mark an invite accepted. Only pending invites change.
    pub async fn mark_accepted(&self, token: &str) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("mark_invite_accepted");
        let result = sqlx::query(
            r#"
            UPDATE trip_invites
            SET status = $2, accepted_at = NOW()
            WHERE token = $1 AND status = 'pending'
            "#,
        )
        .bind(token)
        .bind(InviteStatusDb::Accepted)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Move pending invites past their expiry to `expired`.
    pub async fn expire_stale(&self, now: DateTime<Utc>) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("expire_stale_invites");
        let result = sqlx::query(
            r#"
            UPDATE trip_invites
            SET status = 'expired'
            WHERE status = 'pending' AND expires_at <= $1
            "#,
        )
        .bind(now)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Check if a token already exists.
    pub async fn token_exists(&self, token: &str) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("check_invite_token_exists");
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM trip_invites WHERE token = $1)
            "#,
        )
        .bind(token)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Generate a unique invite token by retrying on collision.
    pub async fn generate_unique_token<F>(&self, generator: F) -> Result<String, sqlx::Error>
    where
        F: Fn() -> String,
    {
        let mut token = generator();
        let mut attempts = 0;

        while self.token_exists(&token).await? {
            token = generator();
            attempts += 1;
            if attempts > 10 {
                return Err(sqlx::Error::Protocol(
                    "Could not generate unique invite token".to_string(),
                ));
            }
        }

        Ok(token)
    }
}

#[async_trait]
impl InviteStore for InviteRepository {
    async fn find_by_token(&self, token: &str) -> Result<Option<TripInvite>, StoreError> {
        InviteRepository::find_by_token(self, token)
            .await
            .map(|invite| invite.map(Into::into))
            .map_err(store_error)
    }

    async fn mark_accepted(&self, token: &str) -> Result<(), StoreError> {
        InviteRepository::mark_accepted(self, token)
            .await
            .map(|_| ())
            .map_err(store_error)
    }
}
