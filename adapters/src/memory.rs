//! In-memory implementation of [`ClientStorage`].
//!
//! Not durable: all state is lost when the value is dropped. Used by tests and
//! by embedders that manage persistence themselves.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::AdapterResult;
use crate::ClientStorage;

#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store pre-populated with `entries`.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl ClientStorage for MemoryStorage {
    async fn get(&self, key: &str) -> AdapterResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> AdapterResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> AdapterResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
