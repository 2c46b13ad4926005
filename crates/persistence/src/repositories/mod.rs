//! Repository implementations for database operations.

pub mod invite;
pub mod membership;
pub mod trip;
pub mod user;

pub use invite::InviteRepository;
pub use membership::MembershipRepository;
pub use trip::{NewTrip, TripRepository};
pub use user::UserRepository;
