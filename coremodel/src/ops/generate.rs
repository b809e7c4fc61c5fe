//! Generate operation - every artifact of every lineage, then the registry.

use coremodel_codegen::{Layout, language::LanguageCodegen, load_lineages};
use coremodel_codegen_rust::{Generator as RustGenerator, RegistryGenerator};
use coremodel_codegen_typescript::Generator as TypeScriptGenerator;
use coremodel_lineage::Library;
use eyre::Result;

use crate::reports::{GenerateReport, GeneratedFile};

/// Execute the generate operation.
///
/// Every lineage is loaded before anything is written, so a broken lineage
/// leaves the repository untouched. Afterwards each lineage gets its Rust
/// file and then its TypeScript file, and the registry comes last. The
/// first failure aborts the run.
pub fn generate(layout: &Layout) -> Result<GenerateReport> {
    let sources = load_lineages(layout, Library::shared())?;

    let generators: [&dyn LanguageCodegen; 2] = [
        &RustGenerator::new(layout),
        &TypeScriptGenerator::new(layout),
    ];

    let mut files = Vec::new();
    for source in &sources {
        let _span = tracing::info_span!("lineage", name = %source.name).entered();
        for generator in generators {
            let written = generator.generate(source)?;
            tracing::info!(
                language = generator.language(),
                path = %written.path.display(),
                result = ?written.result,
                "generated"
            );
            files.push(GeneratedFile::new(layout.root(), &written));
        }
    }

    let registry = RegistryGenerator::new(layout).generate(&sources)?;
    tracing::info!(
        path = %registry.path.display(),
        result = ?registry.result,
        "generated registry"
    );
    files.push(GeneratedFile::new(layout.root(), &registry));

    Ok(GenerateReport {
        lineages: sources.iter().map(|s| s.name.clone()).collect(),
        files,
    })
}
