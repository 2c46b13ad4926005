//! Background job scheduler and job implementations.

mod expire_invites;
mod pool_metrics;
mod scheduler;

pub use expire_invites::ExpireInvitesJob;
pub use pool_metrics::PoolMetricsJob;
pub use scheduler::{Job, JobFrequency, JobScheduler};
