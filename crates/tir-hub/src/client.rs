//! Hub client: URL resolution and cached artifact download.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;

use crate::error::{HubError, Result};

/// User-agent string identifying this tool on hub requests.
pub const HUB_USER_AGENT: &str = concat!("tir-hub/", env!("CARGO_PKG_VERSION"));

/// Default artifact hub endpoint.
pub const HUB_ENDPOINT: &str = "https://huggingface.co";

/// Default store document filename inside a hub repository.
pub const DEFAULT_STORE_FILENAME: &str = "tir-config.store";

/// Default branch holding store documents.
pub const DEFAULT_STORE_REVISION: &str = "tir";

/// Client for downloading artifacts from the hub into a local cache.
#[derive(Debug)]
pub struct HubClient {
    endpoint: Url,
    cache_dir: PathBuf,
    user_agent: String,
    http: reqwest::blocking::Client,
}

impl HubClient {
    pub fn new() -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        let cache_dir = dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("tir")
            .join("hub");

        Ok(Self {
            endpoint: Url::parse(HUB_ENDPOINT).map_err(|_| HubError::InvalidUrl {
                url: HUB_ENDPOINT.to_string(),
            })?,
            cache_dir,
            user_agent: HUB_USER_AGENT.to_string(),
            http,
        })
    }

    /// Builder: point the client at a different hub endpoint.
    pub fn with_endpoint(mut self, endpoint: &str) -> Result<Self> {
        self.endpoint = Url::parse(endpoint).map_err(|_| HubError::InvalidUrl {
            url: endpoint.to_string(),
        })?;
        Ok(self)
    }

    /// Builder: cache downloads under a different directory.
    pub fn with_cache_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_dir = path.into();
        self
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Resolve the hub URL for an artifact inside a repository at a given
    /// revision.
    pub fn artifact_url(&self, repo_id: &str, filename: &str, revision: &str) -> Result<Url> {
        let path = format!(
            "{}/resolve/{}/{}",
            repo_id.trim_matches('/'),
            revision,
            filename
        );
        self.endpoint.join(&path).map_err(|_| HubError::InvalidUrl {
            url: format!("{}/{}", self.endpoint, path),
        })
    }

    /// Local cache location for an artifact.
    pub fn cache_path(&self, repo_id: &str, filename: &str, revision: &str) -> PathBuf {
        self.cache_dir
            .join(repo_id.trim_matches('/').replace('/', "--"))
            .join(revision)
            .join(filename)
    }

    /// Download an artifact into the cache, or return the cached copy.
    ///
    /// A missing artifact surfaces as [`HubError::NotFound`] naming the
    /// filename and the attempted URL.
    pub fn cached_download(&self, repo_id: &str, filename: &str, revision: &str) -> Result<PathBuf> {
        let local = self.cache_path(repo_id, filename, revision);
        if local.exists() {
            tracing::debug!("Cache hit for {:?}", local);
            return Ok(local);
        }

        let url = self.artifact_url(repo_id, filename, revision)?;
        let response = self
            .http
            .get(url.clone())
            .header("User-Agent", &self.user_agent)
            .send()?;

        if !response.status().is_success() {
            return Err(HubError::NotFound {
                filename: filename.to_string(),
                url: url.to_string(),
            });
        }

        let body = response.bytes()?;
        if let Some(parent) = local.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&local, &body)?;
        tracing::info!("Downloaded {} to {:?}", url, local);

        Ok(local)
    }
}
