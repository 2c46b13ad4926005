//! Trip domain model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::membership::MemberRole;

/// A trip record. Photos, documents and expenses hang off a trip elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Trip {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Path of the trip view a client navigates to.
pub fn trip_view_path(trip_id: Uuid) -> String {
    format!("/trips/{}", trip_id)
}

// ============================================================================
// Request DTOs
// ============================================================================

/// Request payload for creating a trip.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateTripRequest {
    #[validate(custom(function = "shared::validation::validate_trip_title"))]
    pub title: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    pub start_date: Option<NaiveDate>,

    pub end_date: Option<NaiveDate>,
}

impl CreateTripRequest {
    /// Cross-field check that the trip does not end before it starts.
    pub fn validate_dates(&self) -> Result<(), ValidationError> {
        shared::validation::validate_date_range(self.start_date, self.end_date)
    }
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Trip as seen by one of its members.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TripResponse {
    #[serde(flatten)]
    pub trip: Trip,
    pub my_role: MemberRole,
    pub member_count: i64,
}

/// Response for listing the caller's trips.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListTripsResponse {
    pub data: Vec<TripResponse>,
}
