//! Generates a coremodel for every lineage under `lineages/`, plus the
//! registry over all of them, into `OUT_DIR`.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use coremodel_codegen::{Config, Layout, load_lineages};
use coremodel_codegen_rust::{Generator, LanguageCodegen, RegistryGenerator};
use coremodel_lineage::{LINEAGE_FILE, Library};
use eyre::{Result, WrapErr};

fn main() -> Result<()> {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=lineages");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);

    let layout = Layout::new(&out_dir, Config::default());
    copy_lineages(&manifest_dir.join("lineages"), &layout.lineages_dir())?;

    let sources = load_lineages(&layout, Library::shared())?;
    let generator = Generator::new(&layout);
    for source in &sources {
        let written = generator.generate(source)?;
        write_includable(&written.path)?;
    }
    let registry = RegistryGenerator::new(&layout).generate(&sources)?;
    write_includable(&registry.path)?;

    Ok(())
}

fn copy_lineages(from: &Path, to: &Path) -> Result<()> {
    for entry in fs::read_dir(from).wrap_err_with(|| format!("reading {}", from.display()))? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let src = entry.path().join(LINEAGE_FILE);
        println!("cargo:rerun-if-changed={}", src.display());

        let dest = to.join(entry.file_name());
        fs::create_dir_all(&dest)?;
        fs::copy(&src, dest.join(LINEAGE_FILE))
            .wrap_err_with(|| format!("copying {}", src.display()))?;
    }
    Ok(())
}

/// Write `<file>.inc.rs` next to `path` without the leading `//!` header,
/// which `include!` does not accept.
fn write_includable(path: &Path) -> Result<()> {
    let content =
        fs::read_to_string(path).wrap_err_with(|| format!("reading {}", path.display()))?;
    let body: String = content
        .lines()
        .skip_while(|line| line.starts_with("//!"))
        .flat_map(|line| [line, "\n"])
        .collect();
    fs::write(path.with_extension("inc.rs"), body)
        .wrap_err_with(|| format!("writing {}", path.display()))
}
