//! Trackly client library crate.
//!
//! Holds the session and access model of the Trackly expense client: who is
//! signed in, what they may see, and how they sign in and out. Navigation,
//! dashboard and profile helpers consume the session's identity.

pub mod auth;
pub mod config;
pub mod errors;
pub mod navigation;
pub mod services;

pub use auth::{Identity, Role, Session, SessionState};
pub use config::ClientConfig;
pub use errors::{ClientError, ClientResult};
