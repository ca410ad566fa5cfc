//! Hardware target descriptors.
//!
//! Each target maps to a compiler backend identifier and a runtime device
//! driver identifier. The mappings are total; the one partial conversion
//! (TensorFlow compiler bridge) reports an explicit error for the variants
//! it cannot express.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Logical hardware target the compiler produces code for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TirTarget {
    /// Portable bytecode interpreter on the host CPU.
    InterpretedCpu,
    /// Ahead-of-time compiled host CPU code via LLVM.
    CompiledCpu,
    /// Vulkan/SPIR-V GPU backend.
    CompiledGpu,
    /// NVIDIA CUDA GPU backend.
    CompiledCuda,
    /// AMD ROCm GPU backend.
    CompiledRocm,
}

impl TirTarget {
    /// All defined targets, in declaration order.
    pub const ALL: [TirTarget; 5] = [
        TirTarget::InterpretedCpu,
        TirTarget::CompiledCpu,
        TirTarget::CompiledGpu,
        TirTarget::CompiledCuda,
        TirTarget::CompiledRocm,
    ];

    /// Compiler backend identifier.
    pub fn backend(&self) -> &'static str {
        match self {
            TirTarget::InterpretedCpu => "vmvx",
            TirTarget::CompiledCpu => "llvm-cpu",
            TirTarget::CompiledGpu => "vulkan",
            TirTarget::CompiledCuda => "cuda",
            TirTarget::CompiledRocm => "rocm",
        }
    }

    /// Runtime device driver identifier used to execute modules compiled
    /// for this target.
    pub fn driver(&self) -> &'static str {
        match self {
            TirTarget::CompiledCuda => "cuda",
            TirTarget::CompiledRocm => "rocm",
            TirTarget::CompiledGpu => "vulkan",
            TirTarget::InterpretedCpu | TirTarget::CompiledCpu => "local-task",
        }
    }

    /// Backend identifier understood by the TensorFlow compiler bridge.
    ///
    /// CUDA and ROCm have no bridge equivalent and return
    /// [`ConfigError::IncompatibleTarget`].
    pub fn tf_compiler_value(&self) -> Result<&'static str, ConfigError> {
        match self {
            TirTarget::InterpretedCpu => Ok("iree_vmvx"),
            TirTarget::CompiledCpu => Ok("iree_llvmcpu"),
            TirTarget::CompiledGpu => Ok("iree_vulkan"),
            TirTarget::CompiledCuda | TirTarget::CompiledRocm => {
                Err(ConfigError::IncompatibleTarget { target: *self })
            }
        }
    }
}

impl fmt::Display for TirTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.backend())
    }
}

impl FromStr for TirTarget {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vmvx" => Ok(TirTarget::InterpretedCpu),
            "llvm-cpu" => Ok(TirTarget::CompiledCpu),
            "vulkan" => Ok(TirTarget::CompiledGpu),
            "cuda" => Ok(TirTarget::CompiledCuda),
            "rocm" => Ok(TirTarget::CompiledRocm),
            _ => Err(ConfigError::UnknownTarget(s.to_string())),
        }
    }
}
