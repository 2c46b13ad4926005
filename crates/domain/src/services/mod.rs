//! Domain services for the Trip Journal backend.
//!
//! Services contain business logic that operates on domain models.

pub mod join_flow;

pub use join_flow::{
    IdentityResolver, InvalidLinkReason, InviteStore, JoinError, JoinFlow, JoinFlowConfig,
    JoinObserver, JoinResponse, JoinState, MembershipStore, RedirectEvent, StoreError,
};
