//! Error types for tir-hub

use thiserror::Error;

/// Result type alias for hub operations
pub type Result<T> = std::result::Result<T, HubError>;

/// Main error type for hub operations
#[derive(Error, Debug)]
pub enum HubError {
    /// Request failed before a response was available
    #[error("Request failed: {0}")]
    Http(String),

    /// URL could not be assembled
    #[error("Invalid URL: {url}")]
    InvalidUrl { url: String },

    /// Artifact missing on the hub
    #[error("Unable to find {filename} at {url}")]
    NotFound { filename: String, url: String },

    /// IO error while caching or reading a store document
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Store document is not valid TOML
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Requested key is absent from the store
    #[error("Key not found in store: {0}")]
    KeyNotFound(String),

    /// Stored entry could not be converted into a configuration
    #[error(transparent)]
    Config(#[from] tir_config::ConfigError),
}

impl From<reqwest::Error> for HubError {
    fn from(err: reqwest::Error) -> Self {
        HubError::Http(err.to_string())
    }
}
