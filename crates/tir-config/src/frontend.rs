//! ML framework frontend descriptors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Compiler input dialect a frontend lowers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputDialect {
    TmTensor,
    Mhlo,
    Tosa,
    Xla,
}

impl InputDialect {
    /// Dialect identifier as the compiler expects it.
    pub fn as_str(&self) -> &'static str {
        match self {
            InputDialect::TmTensor => "tm_tensor",
            InputDialect::Mhlo => "mhlo",
            InputDialect::Tosa => "tosa",
            InputDialect::Xla => "xla",
        }
    }
}

impl fmt::Display for InputDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Originating ML framework being compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TirFrontend {
    Pytorch,
    Tensorflow,
    Tflite,
    Jax,
}

impl TirFrontend {
    /// Frontend name.
    pub fn name(&self) -> &'static str {
        match self {
            TirFrontend::Pytorch => "pytorch",
            TirFrontend::Tensorflow => "tensorflow",
            TirFrontend::Tflite => "tflite",
            TirFrontend::Jax => "jax",
        }
    }

    /// Input dialect this frontend produces.
    pub fn dialect(&self) -> InputDialect {
        match self {
            TirFrontend::Pytorch => InputDialect::TmTensor,
            TirFrontend::Tensorflow => InputDialect::Mhlo,
            TirFrontend::Tflite => InputDialect::Tosa,
            TirFrontend::Jax => InputDialect::Xla,
        }
    }
}

impl fmt::Display for TirFrontend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for TirFrontend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pytorch" => Ok(TirFrontend::Pytorch),
            "tensorflow" => Ok(TirFrontend::Tensorflow),
            "tflite" => Ok(TirFrontend::Tflite),
            "jax" => Ok(TirFrontend::Jax),
            _ => Err(ConfigError::UnknownFrontend(s.to_string())),
        }
    }
}
