//! tir-config: compiler invocation configuration for TIR.
//!
//! This crate prepares argument lists for the IREE compiler without ever
//! invoking it:
//!
//! - **Targets**: logical hardware backends (interpreted/compiled CPU,
//!   Vulkan GPU, CUDA, ROCm) and their backend/driver identifier mappings
//! - **Frontends**: originating ML framework dialects (PyTorch, TensorFlow,
//!   TFLite, JAX) and their compiler input dialects
//! - **Flags**: identifier-unique flag sets rendered in deterministic
//!   position order
//! - **Config**: builder-style [`TirConfig`] assembling flags and an
//!   optional IR output path

pub mod config;
pub mod error;
pub mod flag;
pub mod frontend;
pub mod targets;

pub use config::{TirConfig, PREPEND_POSITION};
pub use error::{ConfigError, Result};
pub use flag::{Flag, FlagSet, FlagValue};
pub use frontend::{InputDialect, TirFrontend};
pub use targets::TirTarget;
