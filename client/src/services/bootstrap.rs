//! Loads client configuration and starts a session from it.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};
use trackly_adapters::{ClientStorage, CredentialDirectory, FileStorage, StaticDirectory};

use crate::auth::Session;
use crate::config::ClientConfig;
use crate::errors::ClientResult;

/// Loads configuration from the environment and `TRACKLY_CONFIG`, with an
/// optional storage path taking precedence over both.
pub fn load_config(storage_override: Option<PathBuf>) -> ClientResult<ClientConfig> {
    let mut config = ClientConfig::from_env_or_yaml()?;
    if let Some(path) = storage_override {
        config.storage_path = path;
    }
    debug!(storage = %config.storage_path.display(), "using client storage");
    Ok(config)
}

/// Restores the session persisted at `config.storage_path`.
pub async fn start_session(config: &ClientConfig) -> Session {
    let storage: Arc<dyn ClientStorage> = Arc::new(FileStorage::new(&config.storage_path));
    start_session_with(config, storage).await
}

/// Restores a session over the given storage, verifying logins against the
/// demo accounts of the configured brand.
pub async fn start_session_with(config: &ClientConfig, storage: Arc<dyn ClientStorage>) -> Session {
    let directory: Arc<dyn CredentialDirectory> =
        Arc::new(StaticDirectory::seeded(config.branding.email_domain()));
    info!(
        backend = storage.backend_name(),
        brand = config.branding.display_name(),
        "starting session"
    );
    Session::restore(storage, directory).await
}
