//! Request-scoped services wiring the domain layer to HTTP.

pub mod identity;
pub mod join_observer;

pub use identity::RequestIdentityResolver;
pub use join_observer::TracingJoinObserver;
