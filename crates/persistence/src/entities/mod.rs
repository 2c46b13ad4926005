//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod invite;
pub mod membership;
pub mod trip;
pub mod user;

pub use invite::{InviteStatusDb, InviteWithTripEntity, TripInviteEntity};
pub use membership::{MemberRoleDb, MemberWithUserEntity, MembershipStatusDb, TripMembershipEntity};
pub use trip::{TripEntity, TripWithMembershipEntity};
pub use user::UserEntity;
