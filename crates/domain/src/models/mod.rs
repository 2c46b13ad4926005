//! Domain models for the Trip Journal backend.

pub mod invite;
pub mod membership;
pub mod trip;
pub mod user;

pub use invite::{InviteStatus, TripInvite};
pub use membership::{MemberRole, MembershipStatus, TripMembership};
pub use trip::Trip;
pub use user::{Identity, User};
