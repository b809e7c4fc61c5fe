use std::{
    fmt,
    path::{Path, PathBuf},
};

use eyre::{Result, WrapErr};

/// Kind of artifact produced by a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Rust types and accessors for one lineage
    Rust,
    /// TypeScript declarations for one lineage
    TypeScript,
    /// The aggregate registry over every lineage
    Registry,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Rust => "rust",
            ArtifactKind::TypeScript => "typescript",
            ArtifactKind::Registry => "registry",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File already held identical content and was left alone
    Unchanged,
}

/// A generated file waiting to be written.
#[derive(Debug, Clone)]
pub struct Artifact {
    kind: ArtifactKind,
    path: PathBuf,
    content: String,
}

impl Artifact {
    pub fn new(kind: ArtifactKind, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            content: content.into(),
        }
    }

    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Write the whole file, creating parent directories as needed.
    ///
    /// Existing files with identical content are not touched, so repeated
    /// runs over unchanged input leave modification times alone.
    pub fn write(&self) -> Result<WriteResult> {
        if std::fs::read(&self.path).is_ok_and(|existing| existing == self.content.as_bytes()) {
            tracing::debug!(path = %self.path.display(), "artifact unchanged");
            return Ok(WriteResult::Unchanged);
        }

        write_file(&self.path, &self.content)
            .wrap_err_with(|| format!("error writing {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), bytes = self.content.len(), "artifact written");
        Ok(WriteResult::Written)
    }
}

/// Ensure `dir` exists, returning whether it had to be created.
pub fn ensure_dir(dir: &Path) -> Result<bool> {
    if dir.is_dir() {
        return Ok(false);
    }
    std::fs::create_dir_all(dir)
        .wrap_err_with(|| format!("error creating directory {}", dir.display()))?;
    Ok(true)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_write_file_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a").join("b").join("c").join("test.txt");

        write_file(&path, "nested").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "nested");
    }

    #[test]
    fn test_artifact_write_overwrites_changed_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("model.rs");
        fs::write(&path, "original").unwrap();

        let artifact = Artifact::new(ArtifactKind::Rust, &path, "updated");
        let result = artifact.write().unwrap();

        assert_eq!(result, WriteResult::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "updated");
    }

    #[test]
    fn test_artifact_write_skips_identical_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("model.ts");

        let artifact = Artifact::new(ArtifactKind::TypeScript, &path, "export {};\n");
        assert_eq!(artifact.write().unwrap(), WriteResult::Written);
        assert_eq!(artifact.write().unwrap(), WriteResult::Unchanged);
        assert_eq!(fs::read_to_string(&path).unwrap(), "export {};\n");
    }

    #[test]
    fn test_artifact_write_error_names_path() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "file, not a directory").unwrap();

        let artifact = Artifact::new(ArtifactKind::Registry, blocker.join("registry_gen.rs"), "");
        let err = artifact.write().unwrap_err();

        assert!(format!("{err}").contains("registry_gen.rs"));
    }

    #[test]
    fn test_ensure_dir() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("schema").join("panel");
        let unrelated = temp.path().join("schema").join("keep.ts");

        assert!(ensure_dir(&dir).unwrap());
        fs::write(&unrelated, "keep").unwrap();
        assert!(!ensure_dir(&dir).unwrap());
        assert_eq!(fs::read_to_string(&unrelated).unwrap(), "keep");
    }

    #[test]
    fn test_artifact_kind_display() {
        assert_eq!(ArtifactKind::Rust.to_string(), "rust");
        assert_eq!(ArtifactKind::TypeScript.to_string(), "typescript");
        assert_eq!(ArtifactKind::Registry.to_string(), "registry");
    }
}
