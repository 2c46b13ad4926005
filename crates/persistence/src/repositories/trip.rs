//! Trip repository for database operations.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{TripEntity, TripWithMembershipEntity};
use crate::metrics::QueryTimer;

/// Fields for a new trip.
#[derive(Debug, Clone)]
pub struct NewTrip<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_by: Uuid,
}

/// Repository for trip-related database operations.
#[derive(Clone)]
pub struct TripRepository {
    pool: PgPool,
}

impl TripRepository {
    /// Creates a new TripRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new trip and add the creator as owner.
    pub async fn create_trip(&self, trip: NewTrip<'_>) -> Result<TripEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_trip");

        // Trip and owner membership are created atomically
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, TripEntity>(
            r#"
            INSERT INTO trips (title, description, start_date, end_date, created_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, description, start_date, end_date, created_by, created_at, updated_at
            "#,
        )
        .bind(trip.title)
        .bind(trip.description)
        .bind(trip.start_date)
        .bind(trip.end_date)
        .bind(trip.created_by)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO trip_memberships (trip_id, user_id, role, status)
            VALUES ($1, $2, 'owner', 'accepted')
            "#,
        )
        .bind(created.id)
        .bind(trip.created_by)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(created)
    }

    /// Find a trip with the given user's accepted membership.
    pub async fn find_trip_for_member(
        &self,
        trip_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<TripWithMembershipEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_trip_for_member");
        let result = sqlx::query_as::<_, TripWithMembershipEntity>(
            r#"
            SELECT
                t.id, t.title, t.description, t.start_date, t.end_date,
                t.created_by, t.created_at, t.updated_at,
                m.role,
                (SELECT COUNT(*) FROM trip_memberships WHERE trip_id = t.id AND status = 'accepted') as member_count
            FROM trips t
            JOIN trip_memberships m ON m.trip_id = t.id
            WHERE t.id = $1 AND m.user_id = $2 AND m.status = 'accepted'
            "#,
        )
        .bind(trip_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List trips the user has joined, most recently created first.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<TripWithMembershipEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_user_trips");
        let result = sqlx::query_as::<_, TripWithMembershipEntity>(
            r#"
            SELECT
                t.id, t.title, t.description, t.start_date, t.end_date,
                t.created_by, t.created_at, t.updated_at,
                m.role,
                (SELECT COUNT(*) FROM trip_memberships WHERE trip_id = t.id AND status = 'accepted') as member_count
            FROM trips t
            JOIN trip_memberships m ON m.trip_id = t.id
            WHERE m.user_id = $1 AND m.status = 'accepted'
            ORDER BY t.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
