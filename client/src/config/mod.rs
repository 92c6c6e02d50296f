//! Central module for client-wide configuration settings.
//!
//! This module loads the API base URL, the location of persisted client
//! storage and the white-label branding from the environment, optionally
//! overridden by a YAML file named by `TRACKLY_CONFIG`.

use std::fs;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_STORAGE_PATH: &str = ".trackly/storage.json";
pub const DEFAULT_APP_NAME: &str = "Trackly";
pub const DEFAULT_CUSTOMER_NAME: &str = "Saol Therapeutics";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("api url must start with http:// or https://, got {0:?}")]
    InvalidApiUrl(String),
}

/// White-label branding. A blank customer name means default branding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branding {
    pub app_name: String,
    pub customer_name: Option<String>,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            customer_name: Some(DEFAULT_CUSTOMER_NAME.to_string()),
        }
    }
}

impl Branding {
    pub fn new(app_name: impl Into<String>, customer_name: Option<String>) -> Self {
        Self {
            app_name: app_name.into(),
            customer_name: customer_name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
        }
    }

    /// Customer name when white-labelled, otherwise the app name.
    pub fn display_name(&self) -> &str {
        self.customer_name.as_deref().unwrap_or(&self.app_name)
    }

    pub fn logo_letter(&self) -> char {
        self.customer_name
            .as_deref()
            .and_then(|name| name.chars().next())
            .unwrap_or('T')
    }

    pub fn email_domain(&self) -> &'static str {
        if self.customer_name.is_some() {
            "saolrx.com"
        } else {
            "trackly.com"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub storage_path: PathBuf,
    pub branding: Branding,
}

#[derive(Debug, Default, Deserialize)]
struct ClientConfigOverride {
    api_base_url: Option<String>,
    storage_path: Option<PathBuf>,
    app_name: Option<String>,
    customer_name: Option<String>,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_base_url =
            lookup("TRACKLY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let storage_path = lookup("TRACKLY_STORAGE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_PATH));
        let app_name = lookup("TRACKLY_APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string());
        let customer_name = lookup("TRACKLY_CUSTOMER_NAME")
            .unwrap_or_else(|| DEFAULT_CUSTOMER_NAME.to_string());

        let config = Self {
            api_base_url,
            storage_path,
            branding: Branding::new(app_name, Some(customer_name)),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_env_or_yaml() -> Result<Self, ConfigError> {
        let config = Self::from_env()?;
        match std::env::var("TRACKLY_CONFIG") {
            Ok(path) => config.with_yaml_file(PathBuf::from(path)),
            Err(_) => Ok(config),
        }
    }

    /// Applies the fields present in a YAML file on top of this config.
    pub fn with_yaml_file(self, path: PathBuf) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        self.with_yaml(&contents)
            .map_err(|source| ConfigError::Parse { path, source })
            .and_then(|config| {
                config.validate()?;
                Ok(config)
            })
    }

    fn with_yaml(mut self, contents: &str) -> Result<Self, serde_yaml::Error> {
        let override_cfg: ClientConfigOverride = serde_yaml::from_str(contents)?;
        if let Some(value) = override_cfg.api_base_url {
            self.api_base_url = value;
        }
        if let Some(value) = override_cfg.storage_path {
            self.storage_path = value;
        }
        if let Some(value) = override_cfg.app_name {
            self.branding.app_name = value;
        }
        if let Some(value) = override_cfg.customer_name {
            self.branding = Branding::new(self.branding.app_name, Some(value));
        }
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://") {
            Ok(())
        } else {
            Err(ConfigError::InvalidApiUrl(self.api_base_url.clone()))
        }
    }
}
