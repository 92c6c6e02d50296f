//! Module for client-side business logic services.
//!
//! This module encapsulates services that sit on top of the session model:
//! starting a session from configuration, deriving the role-aware dashboard,
//! and presenting the signed-in profile.

pub mod bootstrap;
pub mod dashboard;
pub mod profile;
