//! Persistence layer for the Trip Journal backend.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (database row mappings)
//! - Repository implementations, including the join-flow stores

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;

use domain::services::StoreError;

/// Maps a database error onto the collaborator error used by domain services.
pub fn store_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StoreError::Unavailable(err.to_string())
        }
        other => StoreError::Unexpected(other.to_string()),
    }
}
