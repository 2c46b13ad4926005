//! HTTP route handlers.

pub mod health;
pub mod invites;
pub mod join;
pub mod trips;
pub mod users;
