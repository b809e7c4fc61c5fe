//! Discovery and loading of lineage directories.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use coremodel_core::{slash_path, upper_first};
use coremodel_lineage::{LINEAGE_FILE, Library, Lineage, MemoryFs};
use eyre::{Result, WrapErr, bail};

use crate::Layout;

/// Everything the generators need to know about one lineage.
///
/// Built once by [`load_lineages`] and shared read-only by every generator.
#[derive(Debug, Clone)]
pub struct LineageSource {
    pub lineage: Lineage,
    /// Lineage name, e.g. "dashboard"
    pub name: String,
    /// Name with the first character upper-cased, e.g. "Dashboard"
    pub title_name: String,
    /// Absolute path of the lineage file
    pub source_path: PathBuf,
    /// Lineage file path relative to the repository root, `/`-separated
    pub relative_path: String,
}

impl LineageSource {
    pub fn new(lineage: Lineage, source_path: PathBuf, relative_path: String) -> Self {
        let name = lineage.name().to_string();
        Self {
            title_name: upper_first(&name),
            name,
            lineage,
            source_path,
            relative_path,
        }
    }

    /// Directory holding the lineage file.
    pub fn dir(&self) -> &Path {
        self.source_path.parent().unwrap_or(Path::new(""))
    }
}

/// Load every lineage under the layout's lineages directory.
///
/// Subdirectories are visited in file name order; plain files are skipped.
/// The first directory that cannot be loaded aborts the whole scan.
pub fn load_lineages(layout: &Layout, lib: &Library) -> Result<Vec<LineageSource>> {
    let dir = layout.lineages_dir();
    let entries = std::fs::read_dir(&dir)
        .wrap_err_with(|| format!("could not read coremodels dir {}", dir.display()))?;

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry
            .wrap_err_with(|| format!("could not read coremodels dir {}", dir.display()))?;
        let file_type = entry
            .file_type()
            .wrap_err_with(|| format!("could not inspect {}", entry.path().display()))?;
        if file_type.is_dir() {
            dirs.push(entry.path());
        }
    }
    dirs.sort();

    let mut sources = Vec::with_capacity(dirs.len());
    let mut seen: BTreeMap<String, PathBuf> = BTreeMap::new();
    for path in dirs {
        let source = load_lineage_dir(layout.root(), &path, lib)
            .wrap_err_with(|| format!("could not process coremodel dir {}", path.display()))?;

        if let Some(first) = seen.insert(source.name.clone(), path.clone()) {
            bail!(
                "lineage name '{}' is declared by both {} and {}",
                source.name,
                first.display(),
                path.display()
            );
        }

        tracing::info!(lineage = %source.name, path = %source.relative_path, "loaded lineage");
        sources.push(source);
    }

    Ok(sources)
}

fn load_lineage_dir(root: &Path, dir: &Path, lib: &Library) -> Result<LineageSource> {
    let source_path = dir.join(LINEAGE_FILE);
    let bytes = std::fs::read(&source_path)
        .wrap_err_with(|| format!("error reading {}", source_path.display()))?;

    let relative_dir = slash_path(dir.strip_prefix(root).unwrap_or(dir));
    let fs = MemoryFs::single(LINEAGE_FILE, bytes);
    let lineage = coremodel_lineage::load(&relative_dir, &fs, lib)?;

    let relative_path = format!("{relative_dir}/{LINEAGE_FILE}");
    Ok(LineageSource::new(lineage, source_path, relative_path))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::Config;

    const LINEAGE: &str =
        "[[seqs]]\n[[seqs.schemas]]\nfields = { title = { type = \"string\" } }\n";

    fn write_lineage(root: &Path, dir: &str, content: &str) {
        let dir = root.join("pkg/coremodel").join(dir);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(LINEAGE_FILE), content).unwrap();
    }

    #[test]
    fn test_loads_in_name_order_and_skips_files() {
        let temp = TempDir::new().unwrap();
        write_lineage(temp.path(), "playlist", LINEAGE);
        write_lineage(temp.path(), "dashboard", LINEAGE);
        fs::write(temp.path().join("pkg/coremodel/README.md"), "docs").unwrap();

        let layout = Layout::new(temp.path(), Config::default());
        let sources = load_lineages(&layout, Library::shared()).unwrap();

        let names: Vec<_> = sources.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["dashboard", "playlist"]);
        assert_eq!(sources[0].title_name, "Dashboard");
        assert_eq!(sources[0].relative_path, "pkg/coremodel/dashboard/lineage.toml");
        assert_eq!(sources[0].lineage.path(), "pkg/coremodel/dashboard");
        assert!(sources[0].source_path.ends_with("pkg/coremodel/dashboard/lineage.toml"));
        assert_eq!(sources[0].dir(), temp.path().join("pkg/coremodel/dashboard"));
    }

    #[test]
    fn test_malformed_lineage_names_directory() {
        let temp = TempDir::new().unwrap();
        write_lineage(temp.path(), "panel", LINEAGE);
        write_lineage(temp.path(), "widget", "");

        let layout = Layout::new(temp.path(), Config::default());
        let err = load_lineages(&layout, Library::shared()).unwrap_err();

        let msg = format!("{err:#}");
        assert!(msg.starts_with("could not process coremodel dir"), "{msg}");
        assert!(msg.contains("widget"), "{msg}");
    }

    #[test]
    fn test_missing_lineage_file() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("pkg/coremodel/empty")).unwrap();

        let layout = Layout::new(temp.path(), Config::default());
        let err = load_lineages(&layout, Library::shared()).unwrap_err();
        assert!(format!("{err:#}").contains("empty"));
    }

    #[test]
    fn test_missing_lineages_dir() {
        let temp = TempDir::new().unwrap();
        let layout = Layout::new(temp.path(), Config::default());
        let err = load_lineages(&layout, Library::shared()).unwrap_err();
        assert!(err.to_string().starts_with("could not read coremodels dir"));
    }

    #[test]
    fn test_duplicate_declared_names() {
        let temp = TempDir::new().unwrap();
        write_lineage(temp.path(), "panel", LINEAGE);
        write_lineage(temp.path(), "other", &format!("name = \"panel\"\n{LINEAGE}"));

        let layout = Layout::new(temp.path(), Config::default());
        let err = load_lineages(&layout, Library::shared()).unwrap_err();
        assert!(err.to_string().contains("lineage name 'panel' is declared by both"));
    }
}
