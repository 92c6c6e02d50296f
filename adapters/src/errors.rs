//! Custom error types specific to the `adapters` crate.
//!
//! This module defines errors that can occur while reading or writing client
//! storage and while enrolling accounts, providing a unified error handling
//! mechanism for all adapter interactions.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("storage io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("corrupt storage file {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },
    #[error("email already registered: {0}")]
    EmailTaken(String),
    #[error("unknown role: {0}")]
    UnknownRole(String),
}

pub type AdapterResult<T> = Result<T, AdapterError>;
