//! Custom Axum extractors.

pub mod user_auth;

pub use crate::middleware::user_auth::UserAuth;
pub use user_auth::OptionalUserAuth;
