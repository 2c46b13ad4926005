//! Background job that expires lapsed invites.

use chrono::Utc;
use persistence::repositories::InviteRepository;
use sqlx::PgPool;

use super::scheduler::{Job, JobFrequency};
use crate::middleware::metrics::record_invites_expired;

/// Moves pending invites past their `expires_at` to `expired`.
///
/// The join flow already treats such invites as expired; this keeps the
/// stored status and the invite listings in step with that.
pub struct ExpireInvitesJob {
    pool: PgPool,
    interval_minutes: u64,
}

impl ExpireInvitesJob {
    pub fn new(pool: PgPool, interval_minutes: u64) -> Self {
        Self {
            pool,
            interval_minutes,
        }
    }
}

#[async_trait::async_trait]
impl Job for ExpireInvitesJob {
    fn name(&self) -> &'static str {
        "expire_invites"
    }

    fn frequency(&self) -> JobFrequency {
        JobFrequency::Minutes(self.interval_minutes)
    }

    fn run_on_start(&self) -> bool {
        true
    }

    async fn execute(&self) -> Result<u64, String> {
        let expired = InviteRepository::new(self.pool.clone())
            .expire_stale(Utc::now())
            .await
            .map_err(|e| format!("Failed to expire invites: {}", e))?;

        if expired > 0 {
            record_invites_expired(expired);
        }
        Ok(expired)
    }
}
