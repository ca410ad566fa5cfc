//! Keyed configuration store backed by a TOML document.

use std::fs;
use std::path::Path;

use tir_config::TirConfig;

use crate::client::{HubClient, DEFAULT_STORE_FILENAME, DEFAULT_STORE_REVISION};
use crate::error::{HubError, Result};

/// A named, keyed collection of saved configurations.
///
/// The backing document maps configuration names to nested tables. Lookups
/// are read-only; there is no way to mutate a store once loaded.
#[derive(Debug, Clone)]
pub struct TirConfigStore {
    repo_id: String,
    store: toml::Table,
}

impl TirConfigStore {
    /// Load a store document from a local file.
    pub fn from_file(path: impl AsRef<Path>, repo_id: impl Into<String>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let store: toml::Table = toml::from_str(&content)?;
        Ok(Self {
            repo_id: repo_id.into(),
            store,
        })
    }

    /// Fetch the default store document for a repository from the hub.
    pub fn from_hub(client: &HubClient, repo_id: &str) -> Result<Self> {
        Self::from_hub_with(client, repo_id, DEFAULT_STORE_FILENAME, DEFAULT_STORE_REVISION)
    }

    /// Fetch a specific store document from the hub.
    pub fn from_hub_with(
        client: &HubClient,
        repo_id: &str,
        filename: &str,
        revision: &str,
    ) -> Result<Self> {
        let local = client.cached_download(repo_id, filename, revision)?;
        Self::from_file(local, repo_id)
    }

    pub fn repo_id(&self) -> &str {
        &self.repo_id
    }

    /// Look up the nested value stored under a key.
    pub fn get(&self, key: &str) -> Result<&toml::Value> {
        self.store
            .get(key)
            .ok_or_else(|| HubError::KeyNotFound(key.to_string()))
    }

    /// Look up a key and rebuild the configuration saved under it.
    pub fn config(&self, key: &str) -> Result<TirConfig> {
        Ok(TirConfig::from_value(self.get(key)?)?)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.store.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
