//! Domain layer for the Trip Journal backend.
//!
//! This crate contains:
//! - Domain models (Trip, TripInvite, TripMembership, Identity)
//! - The invitation join flow and the collaborator traits it runs against

pub mod models;
pub mod services;
