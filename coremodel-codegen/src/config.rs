//! Repository layout configuration (`coremodel.toml`).

use std::path::Path;

use eyre::{Result, WrapErr};
use serde::Deserialize;

/// Name of the optional configuration file at the repository root.
pub const CONFIG_FILE: &str = "coremodel.toml";

/// Where lineages are read from and where artifacts are written.
///
/// Every key is optional; a missing file means the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory holding one subdirectory per lineage
    pub lineages_dir: String,
    pub rust: RustConfig,
    pub typescript: TypeScriptConfig,
    pub registry: RegistryConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RustConfig {
    /// File name written next to each `lineage.toml`
    pub filename: String,
    /// Crate path generated code imports the lineage runtime from
    pub runtime_crate: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TypeScriptConfig {
    /// Package under `packages/` receiving the declarations
    pub package: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    pub dir: String,
    pub filename: String,
    /// Module path under which lineage modules are reachable from the registry
    pub module_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lineages_dir: "pkg/coremodel".to_string(),
            rust: RustConfig::default(),
            typescript: TypeScriptConfig::default(),
            registry: RegistryConfig::default(),
        }
    }
}

impl Default for RustConfig {
    fn default() -> Self {
        Self {
            filename: "coremodel_gen.rs".to_string(),
            runtime_crate: "coremodel_lineage".to_string(),
        }
    }
}

impl Default for TypeScriptConfig {
    fn default() -> Self {
        Self {
            package: "grafana-schema".to_string(),
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            dir: "pkg/framework/coremodel/staticregistry".to_string(),
            filename: "registry_gen.rs".to_string(),
            module_path: "crate::coremodel".to_string(),
        }
    }
}

impl Config {
    /// Read `coremodel.toml` from `root`, falling back to defaults when absent.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        Self::parse(&content).wrap_err_with(|| format!("invalid {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| eyre::eyre!(e.message().to_string()))?;
        Ok(config)
    }
}
