//! Shared utilities and common types for the Trip Journal backend.
//!
//! This crate provides common functionality used across all other crates:
//! - JWT access-token verification
//! - Invite token generation
//! - Common validation logic

pub mod crypto;
pub mod jwt;
pub mod validation;
