//! TypeScript declaration generator for one lineage.

use coremodel_codegen::{
    Layout, LineageSource,
    builder::CodeBuilder,
    language::{GeneratedArtifact, LanguageCodegen},
};
use coremodel_core::{Artifact, ArtifactKind, ensure_dir};
use coremodel_lineage::schema_for;
use eyre::{Result, WrapErr};

use crate::{
    emitter::{TypeKind, check_unique, generate_ast, generate_single_ast},
    sort::toposort,
};

/// Name of the top-level declaration of every generated file.
pub const MODEL_NAME: &str = "Model";

/// Generates `<name>.gen.ts` for one lineage.
///
/// The file holds a declaration per named definition of the latest schema
/// plus `export interface Model` for its root, ordered so that every
/// declaration follows the ones it references.
pub struct Generator<'a> {
    layout: &'a Layout,
}

impl LanguageCodegen for Generator<'_> {
    fn language(&self) -> &'static str {
        "typescript"
    }

    fn preview(&self, source: &LineageSource) -> Result<Artifact> {
        let content = self
            .render(source)
            .wrap_err_with(|| format!("failed to generate TypeScript code for {}", source.name))?;
        Ok(Artifact::new(
            ArtifactKind::TypeScript,
            self.layout.typescript_output(&source.name),
            content,
        ))
    }

    fn generate(&self, source: &LineageSource) -> Result<GeneratedArtifact> {
        let artifact = self.preview(source)?;

        let dir = self.layout.typescript_dir(&source.name);
        let created = ensure_dir(&dir).wrap_err_with(|| {
            format!("failed to prepare TypeScript output for {}", source.name)
        })?;
        if created {
            tracing::info!(lineage = %source.name, dir = %dir.display(), "created TypeScript directory");
        }

        let result = artifact.write()?;
        Ok(GeneratedArtifact::new(&artifact, result))
    }
}

impl<'a> Generator<'a> {
    pub fn new(layout: &'a Layout) -> Self {
        Self { layout }
    }

    /// Render the TypeScript file for `source` without writing it.
    pub fn render(&self, source: &LineageSource) -> Result<String> {
        let lineage = &source.lineage;
        let schema = schema_for(lineage, lineage.latest_version()).wrap_err("schema lookup")?;

        let mut decls = generate_ast(schema).wrap_err("typescript declaration generation")?;
        let top = generate_single_ast(MODEL_NAME, schema.root(), TypeKind::Interface)
            .wrap_err("top-level declaration generation")?;
        let mut model = top.ty;
        model.set_doc(schema.description());
        decls.push(model);
        decls.extend(top.default);
        check_unique(&decls).wrap_err("top-level declaration generation")?;

        let decls = toposort(decls);
        tracing::debug!(lineage = %source.name, declarations = decls.len(), "sorted declarations");

        let body = decls
            .iter()
            .enumerate()
            .fold(CodeBuilder::typescript(), |builder, (i, decl)| {
                let builder = if i > 0 { builder.blank() } else { builder };
                builder.emit(decl)
            })
            .build();

        Ok(format!("{}{body}", header(&source.relative_path)))
    }
}

fn header(relative_path: &str) -> String {
    format!(
        "// This file is autogenerated. DO NOT EDIT.\n//\n// Derived from the lineage at {relative_path}\n\n"
    )
}
