//! Global client error types.
//!
//! Composes the per-layer errors so callers that drive the whole client can
//! propagate any of them with `?`.

use thiserror::Error;

use crate::auth::AuthError;
use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("render output: {0}")]
    Render(#[from] serde_json::Error),
}

pub type ClientResult<T> = Result<T, ClientError>;
