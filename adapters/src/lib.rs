//! Core `adapters` crate for abstracting the collaborators of the Trackly
//! session model.
//!
//! This crate defines the [`ClientStorage`] trait, a key-value store standing
//! in for browser local storage, and the [`CredentialDirectory`] trait that
//! verifies logins. It also provides the concrete implementations used by the
//! client: in-memory and file-backed storage, and the static credential table.

pub mod directory;
pub mod errors;
pub mod file;
pub mod memory;
pub mod models;

use async_trait::async_trait;

pub use directory::StaticDirectory;
pub use errors::{AdapterError, AdapterResult};
pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use models::{Account, Identity, Role};

/// Persisted client-side key-value storage.
///
/// Removing a key that is not present succeeds.
#[async_trait]
pub trait ClientStorage: Send + Sync {
    async fn get(&self, key: &str) -> AdapterResult<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> AdapterResult<()>;
    async fn remove(&self, key: &str) -> AdapterResult<()>;
    fn backend_name(&self) -> &'static str;
}

/// Verifies credentials and enrolls new accounts.
#[async_trait]
pub trait CredentialDirectory: Send + Sync {
    /// Returns the identity when `email` is known and `password` matches it.
    async fn verify(&self, email: &str, password: &str) -> Option<Identity>;

    /// Adds a new account and returns its identity.
    async fn enroll(&self, email: &str, name: &str, password: &str) -> AdapterResult<Identity>;
}
