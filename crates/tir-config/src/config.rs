//! Builder-style compiler invocation configuration.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::flag::{Flag, FlagSet, FlagValue};
use crate::targets::TirTarget;

/// Reserved position below every normal flag position. Flags inserted here
/// render before anything else regardless of registration order.
pub const PREPEND_POSITION: i64 = -1000;

/// Position reserved for target-selection flags.
const TARGET_POSITION: i64 = -1;

/// A compiler invocation configuration: an identifier-unique flag set plus
/// an optional path where IR text is written later.
///
/// Builder methods consume and return `self` so calls chain:
///
/// ```
/// use tir_config::TirConfig;
///
/// let args = TirConfig::new()
///     .with_debug_flags()
///     .with_cpu_target(None)
///     .compiler_args();
/// assert_eq!(args.last().unwrap(), "--iree-llvm-target-cpu-features=host");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TirConfig {
    flags: FlagSet,
    ir_output_path: Option<PathBuf>,
}

impl TirConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse raw flag entries into a flag set. Each entry's position is its
    /// index in the list; entries must be TOML strings naming the flag.
    pub fn parse_flags(raw: &[toml::Value]) -> Result<FlagSet> {
        raw.iter()
            .enumerate()
            .map(|(index, entry)| {
                Flag::from_sequence(&[toml::Value::Integer(index as i64), entry.clone()])
            })
            .collect()
    }

    /// Build a configuration from raw flag entries.
    pub fn from_flags(raw: &[toml::Value]) -> Result<Self> {
        Ok(Self {
            flags: Self::parse_flags(raw)?,
            ir_output_path: None,
        })
    }

    /// Rebuild a configuration from a stored document entry.
    ///
    /// The entry is a table with an optional `flags` array of
    /// `[position, id]` / `[position, id, value]` sequences and an optional
    /// `ir_output` path. Unknown keys are ignored.
    pub fn from_value(value: &toml::Value) -> Result<Self> {
        let table = value.as_table().ok_or_else(|| {
            ConfigError::InvalidConfig(format!("expected a table, got {value}"))
        })?;

        let mut config = TirConfig::new();

        if let Some(flags) = table.get("flags") {
            let entries = flags.as_array().ok_or_else(|| {
                ConfigError::InvalidConfig("flags must be an array of sequences".to_string())
            })?;
            for entry in entries {
                let parts = entry.as_array().ok_or_else(|| {
                    ConfigError::InvalidConfig(format!("flag entry must be a sequence, got {entry}"))
                })?;
                config.flags.insert(Flag::from_sequence(parts)?);
            }
        }

        if let Some(path) = table.get("ir_output") {
            let path = path.as_str().ok_or_else(|| {
                ConfigError::InvalidConfig("ir_output must be a string path".to_string())
            })?;
            config.ir_output_path = Some(PathBuf::from(path));
        }

        Ok(config)
    }

    /// Include the MLIR debugging flags in the compiler invocation. They
    /// always render first.
    pub fn with_debug_flags(mut self) -> Self {
        self.flags.insert(Flag::new(
            PREPEND_POSITION,
            "--mlir-elide-elementsattrs-if-larger",
            Some(FlagValue::Int(1)),
        ));
        self.flags
            .insert(Flag::new(PREPEND_POSITION, "--mlir-print-ir-before-all", None));
        self
    }

    /// Define the CPU features LLVM compiles for (for example
    /// `skylake-avx512`). Defaults to the generic `host` set.
    pub fn with_cpu_target(mut self, target: Option<&str>) -> Self {
        self.flags.insert(Flag::new(
            TARGET_POSITION,
            "--iree-llvm-target-cpu-features",
            Some(FlagValue::from(target.unwrap_or("host"))),
        ));
        self
    }

    /// Define the GPU device capability LLVM compiles for. The capability
    /// version is normalized by stripping dots and prefixing `sm_`, so
    /// `"8.0"` becomes `sm_80`.
    pub fn with_gpu_target(mut self, target_sm: &str) -> Self {
        let arch = format!("sm_{}", target_sm.replace('.', ""));
        self.flags.insert(Flag::new(
            TARGET_POSITION,
            "--iree-hal-cuda-llvm-target-arch",
            Some(FlagValue::Str(arch)),
        ));
        self
    }

    /// Save intermediate representations at the specified path.
    pub fn with_ir_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.ir_output_path = Some(path.into());
        self
    }

    /// Register an arbitrary flag with an optional value. Without an
    /// explicit position the flag is appended after everything already
    /// registered.
    pub fn register_flag(
        mut self,
        id: impl Into<String>,
        value: Option<FlagValue>,
        position: Option<i64>,
    ) -> Self {
        let position = position.unwrap_or_else(|| self.flags.next_position());
        self.flags.insert(Flag::new(position, id, value));
        self
    }

    /// The flags to forward to the compiler, ordered by position.
    pub fn compiler_args(&self) -> Vec<String> {
        self.flags.render()
    }

    pub fn flags(&self) -> &FlagSet {
        &self.flags
    }

    pub fn ir_output_path(&self) -> Option<&Path> {
        self.ir_output_path.as_deref()
    }

    /// Write the IR module text to the configured output path. A no-op when
    /// no path was configured.
    pub fn save_ir(&self, module: &str) -> Result<()> {
        if let Some(path) = &self.ir_output_path {
            fs::write(path, module)?;
            tracing::debug!("Saved IR module to {:?}", path);
        }
        Ok(())
    }

    /// Tuned parameters for the specified device, or a default set when the
    /// device has no tuned configuration.
    pub fn tuned_parameters_for_device(
        &self,
        _device: TirTarget,
    ) -> Result<HashMap<String, FlagValue>> {
        Err(ConfigError::Unimplemented("tuned parameter retrieval"))
    }

    /// Which parameters of this configuration can be tuned for the
    /// specified device.
    pub fn tunable_parameters(&self, _device: TirTarget) -> Result<HashMap<String, FlagValue>> {
        Err(ConfigError::Unimplemented("tunable parameter discovery"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(flags: &[&str]) -> Vec<toml::Value> {
        flags
            .iter()
            .map(|f| toml::Value::String(f.to_string()))
            .collect()
    }

    #[test]
    fn parse_flags_positions_follow_list_order() {
        let set = TirConfig::parse_flags(&raw(&["--a", "--b", "--c"])).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.get("--a").unwrap().position(), 0);
        assert_eq!(set.get("--b").unwrap().position(), 1);
        assert_eq!(set.get("--c").unwrap().position(), 2);
    }

    #[test]
    fn parse_flags_rejects_non_string_entries() {
        let entries = vec![toml::Value::Integer(7)];
        assert!(matches!(
            TirConfig::parse_flags(&entries),
            Err(ConfigError::InvalidFlag(_))
        ));
    }

    #[test]
    fn debug_flags_render_first() {
        let config = TirConfig::from_flags(&raw(&["--x", "--y"]))
            .unwrap()
            .with_cpu_target(Some("icelake-server"))
            .with_debug_flags();

        let args = config.compiler_args();
        assert_eq!(args[0], "--mlir-elide-elementsattrs-if-larger=1");
        assert_eq!(args[1], "--mlir-print-ir-before-all");
    }

    #[test]
    fn cpu_target_defaults_to_host() {
        let args = TirConfig::new().with_cpu_target(None).compiler_args();
        assert_eq!(args, vec!["--iree-llvm-target-cpu-features=host"]);
    }

    #[test]
    fn gpu_target_normalizes_capability() {
        let args = TirConfig::new().with_gpu_target("8.0").compiler_args();
        assert_eq!(args, vec!["--iree-hal-cuda-llvm-target-arch=sm_80"]);
    }

    #[test]
    fn empty_config_renders_nothing() {
        assert!(TirConfig::new().compiler_args().is_empty());
    }

    #[test]
    fn reregistering_overwrites_by_identifier() {
        let config = TirConfig::new()
            .register_flag("--opt-level", Some(FlagValue::Int(1)), None)
            .register_flag("--opt-level", Some(FlagValue::Int(3)), None);

        assert_eq!(config.compiler_args(), vec!["--opt-level=3"]);
    }

    #[test]
    fn register_without_position_appends() {
        let config = TirConfig::from_flags(&raw(&["--a", "--b"]))
            .unwrap()
            .register_flag("--tail", None, None);

        let args = config.compiler_args();
        assert_eq!(args.last().unwrap(), "--tail");
    }

    #[test]
    fn register_with_explicit_position() {
        let config = TirConfig::from_flags(&raw(&["--a"]))
            .unwrap()
            .register_flag("--head", None, Some(-5));

        assert_eq!(config.compiler_args(), vec!["--head", "--a"]);
    }

    #[test]
    fn save_ir_writes_configured_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("module.mlir");

        let config = TirConfig::new().with_ir_output(&path);
        config.save_ir("module {}").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "module {}");
    }

    #[test]
    fn save_ir_without_path_is_a_noop() {
        TirConfig::new().save_ir("module {}").unwrap();
    }

    #[test]
    fn tuning_queries_are_unimplemented() {
        let config = TirConfig::new();
        assert!(matches!(
            config.tuned_parameters_for_device(TirTarget::CompiledCuda),
            Err(ConfigError::Unimplemented(_))
        ));
        assert!(matches!(
            config.tunable_parameters(TirTarget::CompiledCpu),
            Err(ConfigError::Unimplemented(_))
        ));
    }

    #[test]
    fn from_value_rebuilds_flags_and_output_path() {
        let doc: toml::Value = toml::from_str(
            r#"
flags = [[-1000, "--mlir-print-ir-before-all"], [0, "--iree-llvm-target-cpu-features", "host"]]
ir_output = "/tmp/module.mlir"
"#,
        )
        .unwrap();

        let config = TirConfig::from_value(&doc).unwrap();
        assert_eq!(
            config.compiler_args(),
            vec![
                "--mlir-print-ir-before-all",
                "--iree-llvm-target-cpu-features=host"
            ]
        );
        assert_eq!(
            config.ir_output_path(),
            Some(Path::new("/tmp/module.mlir"))
        );
    }

    #[test]
    fn from_value_rejects_non_tables() {
        let value = toml::Value::Integer(1);
        assert!(matches!(
            TirConfig::from_value(&value),
            Err(ConfigError::InvalidConfig(_))
        ));
    }
}
