//! Error types for tir-config

use thiserror::Error;

use crate::targets::TirTarget;

/// Result type alias for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Main error type for configuration operations
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Target has no equivalent in the requested mapping
    #[error("target {target} is not compatible with the tf compiler")]
    IncompatibleTarget { target: TirTarget },

    /// Unknown target identifier
    #[error("unknown target: {0}")]
    UnknownTarget(String),

    /// Unknown frontend identifier
    #[error("unknown frontend: {0}")]
    UnknownFrontend(String),

    /// Flag sequence with an unsupported number of elements
    #[error("unable to create a flag from {0} elements, only pair and triplet are supported")]
    UnsupportedArity(usize),

    /// Malformed flag sequence element
    #[error("invalid flag: {0}")]
    InvalidFlag(String),

    /// Malformed stored configuration entry
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Operation has no implementation
    #[error("{0} is not implemented")]
    Unimplemented(&'static str),

    /// IO error while writing IR output
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
