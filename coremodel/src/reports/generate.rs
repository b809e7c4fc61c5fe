//! Generate report data structures.

use std::path::Path;

use coremodel_codegen::language::GeneratedArtifact;
use coremodel_core::{ArtifactKind, WriteResult, slash_path};

use super::output::{Output, Report};

/// What one generation run produced.
#[derive(Debug)]
pub struct GenerateReport {
    /// Lineage names in the order they were processed.
    pub lineages: Vec<String>,
    pub files: Vec<GeneratedFile>,
}

/// One artifact, with its path relative to the repository root.
#[derive(Debug)]
pub struct GeneratedFile {
    pub kind: ArtifactKind,
    pub path: String,
    pub result: WriteResult,
}

impl GeneratedFile {
    pub fn new(root: &Path, artifact: &GeneratedArtifact) -> Self {
        let path = artifact.path.strip_prefix(root).unwrap_or(&artifact.path);
        Self {
            kind: artifact.kind,
            path: slash_path(path),
            result: artifact.result,
        }
    }
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        out.section(&format!("Lineages ({})", self.lineages.len()));
        for lineage in &self.lineages {
            out.unchanged_item(lineage);
        }
        out.newline();

        let written = self
            .files
            .iter()
            .filter(|f| f.result == WriteResult::Written)
            .count();
        out.section(&format!("Generated ({written} written)"));
        for file in &self.files {
            let line = format!("{} ({})", file.path, file.kind);
            match file.result {
                WriteResult::Written => out.added_item(&line),
                WriteResult::Unchanged => out.unchanged_item(&line),
            }
        }
    }
}
