//! In-memory filesystem handed to the lineage loader.

use indexmap::IndexMap;

/// A read-only set of named files held in memory.
///
/// Lineages are always loaded from a `MemoryFs`, whether the bytes came from
/// disk at generation time or were embedded into a generated crate.
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    files: IndexMap<String, Vec<u8>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// A filesystem containing exactly one file.
    pub fn single(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self::new().with_file(name, bytes)
    }

    pub fn with_file(mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(name, bytes);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.files.insert(name.into(), bytes.into());
    }

    pub fn read(&self, name: &str) -> Option<&[u8]> {
        self.files.get(name).map(Vec::as_slice)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_file() {
        let fs = MemoryFs::single("lineage.toml", "name = \"panel\"");
        assert_eq!(fs.read("lineage.toml"), Some(&b"name = \"panel\""[..]));
        assert_eq!(fs.read("missing.toml"), None);
        assert_eq!(fs.names().collect::<Vec<_>>(), ["lineage.toml"]);
    }
}
