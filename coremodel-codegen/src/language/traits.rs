//! Language-agnostic code generation traits.

use std::path::PathBuf;

use coremodel_core::{Artifact, ArtifactKind, WriteResult};
use eyre::Result;

use crate::LineageSource;

/// Trait for generators producing one artifact per lineage.
pub trait LanguageCodegen {
    /// Language identifier (e.g., "rust", "typescript")
    fn language(&self) -> &'static str;

    /// Render the artifact for `source` without touching the filesystem.
    fn preview(&self, source: &LineageSource) -> Result<Artifact>;

    /// Render and write the artifact for `source`.
    fn generate(&self, source: &LineageSource) -> Result<GeneratedArtifact> {
        let artifact = self.preview(source)?;
        let result = artifact.write()?;
        Ok(GeneratedArtifact::new(&artifact, result))
    }
}

/// An artifact that reached the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub result: WriteResult,
}

impl GeneratedArtifact {
    pub fn new(artifact: &Artifact, result: WriteResult) -> Self {
        Self {
            kind: artifact.kind(),
            path: artifact.path().to_path_buf(),
            result,
        }
    }
}
