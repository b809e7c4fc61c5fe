//! Shared type library lineages are resolved against.

use std::sync::OnceLock;

use indexmap::IndexMap;

use crate::Scalar;

/// Named scalar types available to lineage files.
///
/// The default library knows every [`Scalar`] under its canonical name.
/// Custom libraries add aliases on top, e.g. `timestamp` for `string`.
#[derive(Debug, Clone)]
pub struct Library {
    types: IndexMap<String, Scalar>,
}

impl Library {
    pub fn new() -> Self {
        let types = Scalar::ALL
            .iter()
            .map(|s| (s.as_str().to_string(), *s))
            .collect();
        Self { types }
    }

    /// The process-wide default library.
    pub fn shared() -> &'static Library {
        static SHARED: OnceLock<Library> = OnceLock::new();
        SHARED.get_or_init(Library::new)
    }

    /// Register an additional name for a scalar.
    pub fn with_alias(mut self, name: impl Into<String>, scalar: Scalar) -> Self {
        self.types.insert(name.into(), scalar);
        self
    }

    pub fn resolve(&self, name: &str) -> Option<Scalar> {
        self.types.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }
}

impl Default for Library {
    fn default() -> Self {
        Self::new()
    }
}
