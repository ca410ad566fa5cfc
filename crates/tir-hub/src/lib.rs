//! tir-hub: artifact hub client and named configuration store.
//!
//! Retrieves TIR configuration documents from a remote artifact hub and
//! exposes them as a keyed, read-only store:
//!
//! - **Client**: resolves `{repo_id, filename, revision}` to a hub URL and
//!   downloads it once into a local cache, tagged with a fixed user-agent
//! - **Store**: a TOML document mapping configuration names to saved
//!   [`tir_config::TirConfig`] entries

pub mod client;
pub mod error;
pub mod store;

pub use client::{
    HubClient, DEFAULT_STORE_FILENAME, DEFAULT_STORE_REVISION, HUB_ENDPOINT, HUB_USER_AGENT,
};
pub use error::{HubError, Result};
pub use store::TirConfigStore;
