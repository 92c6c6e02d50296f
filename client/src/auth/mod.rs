//! Authentication module for the client session, role gating and access control.
//!
//! This module provides the public interface of the session model: login,
//! registration and logout, the route table and its guard, role predicates,
//! and the notices shown for each session outcome.

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;

// Re-exports for convenience
pub use errors::*;
pub use handlers::*;
pub use middleware::*;
pub use models::*;
pub use routes::*;
pub use service::*;
