//! Resolved filesystem locations for one generation run.

use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr, eyre};

use crate::{Config, LineageSource};

/// Number of path components between the repository root and the directory
/// the generator is run from (`pkg/framework/coremodel`).
pub const ROOT_DEPTH: usize = 3;

/// Resolve the repository root from the generator's working directory.
pub fn resolve_root(cwd: &Path) -> Result<PathBuf> {
    let mut root = cwd;
    for _ in 0..ROOT_DEPTH {
        root = root.parent().ok_or_else(|| {
            eyre!(
                "working directory {} is not {ROOT_DEPTH} levels below a repository root",
                cwd.display()
            )
        })?;
    }
    Ok(root.to_path_buf())
}

/// Repository root plus the configuration deciding where everything lives.
#[derive(Debug, Clone)]
pub struct Layout {
    root: PathBuf,
    config: Config,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>, config: Config) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Layout for `root`, reading `coremodel.toml` when present.
    pub fn load(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let config = Config::load(&root).wrap_err("failed to load generator configuration")?;
        Ok(Self::new(root, config))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn lineages_dir(&self) -> PathBuf {
        self.root.join(&self.config.lineages_dir)
    }

    /// Rust output lives next to the lineage file it was generated from.
    pub fn rust_output(&self, source: &LineageSource) -> PathBuf {
        source.dir().join(&self.config.rust.filename)
    }

    pub fn typescript_dir(&self, name: &str) -> PathBuf {
        self.root
            .join("packages")
            .join(&self.config.typescript.package)
            .join("src")
            .join("schema")
            .join(name)
    }

    pub fn typescript_output(&self, name: &str) -> PathBuf {
        self.typescript_dir(name).join(format!("{name}.gen.ts"))
    }

    pub fn registry_output(&self) -> PathBuf {
        self.root
            .join(&self.config.registry.dir)
            .join(&self.config.registry.filename)
    }
}
