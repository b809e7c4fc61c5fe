//! The static registry wiring every generated coremodel together.

use coremodel_codegen::{Layout, LineageSource, Templates, language::GeneratedArtifact};
use coremodel_core::{Artifact, ArtifactKind};
use eyre::{Result, WrapErr};
use serde::Serialize;

use crate::format::normalize_imports;

const REGISTRY_TEMPLATE: &str = "registry.tmpl";
const REGISTRY: &str = include_str!("../templates/registry.tmpl");

/// Generates `registry_gen.rs` over the full, ordered lineage list.
///
/// For every lineage the registry declares a provider, an `ExplicitRegistry`
/// accessor named after the title-cased lineage name, and an entry in the
/// generic `Registry`.
pub struct RegistryGenerator<'a> {
    layout: &'a Layout,
}

#[derive(Serialize)]
struct RegistryContext<'a> {
    lineages_dir: &'a str,
    runtime_crate: &'a str,
    module_path: &'a str,
    lineages: Vec<LineageEntry<'a>>,
}

#[derive(Serialize)]
struct LineageEntry<'a> {
    name: &'a str,
    title_name: &'a str,
}

impl<'a> RegistryGenerator<'a> {
    pub fn new(layout: &'a Layout) -> Self {
        Self { layout }
    }

    /// Render the registry without writing it.
    pub fn render(&self, sources: &[LineageSource]) -> Result<String> {
        let config = self.layout.config();
        let ctx = RegistryContext {
            lineages_dir: &config.lineages_dir,
            runtime_crate: &config.rust.runtime_crate,
            module_path: &config.registry.module_path,
            lineages: sources
                .iter()
                .map(|source| LineageEntry {
                    name: &source.name,
                    title_name: &source.title_name,
                })
                .collect(),
        };

        let rendered = Templates::new()
            .with(REGISTRY_TEMPLATE, REGISTRY)
            .render(REGISTRY_TEMPLATE, ctx)?;
        let file = syn::parse_file(&rendered).wrap_err("parsing generated registry")?;
        normalize_imports(&prettyplease::unparse(&file)).wrap_err("import normalization")
    }

    pub fn preview(&self, sources: &[LineageSource]) -> Result<Artifact> {
        let content = self
            .render(sources)
            .wrap_err("failed to generate coremodel registry")?;
        Ok(Artifact::new(
            ArtifactKind::Registry,
            self.layout.registry_output(),
            content,
        ))
    }

    pub fn generate(&self, sources: &[LineageSource]) -> Result<GeneratedArtifact> {
        let artifact = self.preview(sources)?;
        let result = artifact.write()?;
        Ok(GeneratedArtifact::new(&artifact, result))
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use coremodel_codegen::Config;
    use coremodel_lineage::{LINEAGE_FILE, Library, MemoryFs, load};

    use super::*;

    fn source(name: &str) -> LineageSource {
        let path = format!("pkg/coremodel/{name}");
        let src = "[[seqs]]\n[[seqs.schemas]]\nfields = { title = { type = \"string\" } }\n";
        let lineage = load(&path, &MemoryFs::single(LINEAGE_FILE, src), Library::shared()).unwrap();
        LineageSource::new(
            lineage,
            PathBuf::from(format!("/repo/{path}/{LINEAGE_FILE}")),
            format!("{path}/{LINEAGE_FILE}"),
        )
    }

    fn positions(out: &str, needles: &[String]) -> Vec<usize> {
        needles
            .iter()
            .map(|needle| {
                out.find(needle.as_str())
                    .unwrap_or_else(|| panic!("missing {needle}\n{out}"))
            })
            .collect()
    }

    #[test]
    fn test_every_lineage_wired_in_order() {
        let layout = Layout::new("/repo", Config::default());
        let sources = [source("dashboard"), source("playlist"), source("panel")];
        let out = RegistryGenerator::new(&layout).render(&sources).unwrap();

        for name in ["dashboard", "playlist", "panel"] {
            let title = coremodel_core::upper_first(name);
            assert!(
                out.contains(&format!("fn {title}(&self) -> Arc<{name}::Coremodel>;")),
                "{out}"
            );
            assert!(out.contains(&format!("{name}: Arc<{name}::Coremodel>,")), "{out}");
            assert!(out.contains(&format!("\"{name}\"")), "{out}");
            assert!(out.contains(&format!("{name}::provide_coremodel(lib)")), "{out}");
            assert!(out.contains(&format!("ereg.{title}() as Arc<dyn Interface>")), "{out}");
        }

        let trait_order = positions(
            &out,
            &["fn Dashboard(&self)".into(), "fn Playlist(&self)".into(), "fn Panel(&self)".into()],
        );
        assert!(trait_order.windows(2).all(|w| w[0] < w[1]));

        let registry_order = positions(
            &out,
            &["ereg.Dashboard()".into(), "ereg.Playlist()".into(), "ereg.Panel()".into()],
        );
        assert!(registry_order.windows(2).all(|w| w[0] < w[1]));

        assert!(out.contains("use crate::coremodel::{dashboard, panel, playlist};"), "{out}");
        assert!(out.contains("static DEFAULT_EXPLICIT: OnceLock<"));
        assert!(out.contains("static DEFAULT_REGISTRY: OnceLock<"));
        assert!(syn::parse_file(&out).is_ok());
    }

    #[test]
    fn test_empty_registry_parses() {
        let layout = Layout::new("/repo", Config::default());
        let out = RegistryGenerator::new(&layout).render(&[]).unwrap();
        assert!(out.contains("pub trait ExplicitRegistry: Send + Sync {}"), "{out}");
        assert!(!out.contains("Interface"), "{out}");
        assert!(syn::parse_file(&out).is_ok());
    }

    #[test]
    fn test_output_path() {
        let layout = Layout::new("/repo", Config::default());
        let artifact = RegistryGenerator::new(&layout).preview(&[source("panel")]).unwrap();
        assert_eq!(artifact.kind(), ArtifactKind::Registry);
        assert_eq!(
            artifact.path(),
            PathBuf::from("/repo/pkg/framework/coremodel/staticregistry/registry_gen.rs")
        );
    }
}
