//! Custom error types specific to authentication failures.
//!
//! `InvalidCredentials` is the only failure of the login flow itself and is
//! always recoverable by trying again. The remaining variants come from the
//! adapters underneath the session.

use thiserror::Error;
use trackly_adapters::AdapterError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("email already registered: {0}")]
    EmailTaken(String),
    #[error("session storage failure: {0}")]
    Storage(#[source] AdapterError),
    #[error("malformed session profile: {0}")]
    Profile(#[from] serde_json::Error),
}

impl From<AdapterError> for AuthError {
    fn from(err: AdapterError) -> Self {
        match err {
            AdapterError::EmailTaken(email) => AuthError::EmailTaken(email),
            other => AuthError::Storage(other),
        }
    }
}

pub type AuthResult<T> = Result<T, AuthError>;
