//! Runtime contract shared by every generated coremodel.
//!
//! Generated lineage modules implement [`Interface`] for their `Coremodel`
//! wrapper; the generated registry collects them into a [`Registry`] and
//! lists their constructors in a [`ProviderSet`].

use std::{any::Any, fmt, sync::Arc};

use indexmap::IndexMap;

use crate::{Error, Library, Lineage, Result, Schema};

/// Behavior common to every coremodel.
pub trait Interface: Send + Sync {
    /// Lineage name, e.g. "dashboard".
    fn name(&self) -> &str;

    fn lineage(&self) -> &Lineage;

    /// The schema the generated Rust types correspond to.
    fn current_schema(&self) -> &Schema;

    /// A fresh, empty instance of the generated top-level type.
    fn new_value(&self) -> Box<dyn Any + Send>;
}

impl fmt::Debug for dyn Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interface")
            .field("name", &self.name())
            .field("version", &self.current_schema().version())
            .finish()
    }
}

/// Ordered collection of coremodels keyed by lineage name.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    models: IndexMap<String, Arc<dyn Interface>>,
}

impl Registry {
    /// Build a registry, rejecting two models with the same name.
    pub fn new(models: impl IntoIterator<Item = Arc<dyn Interface>>) -> Result<Self> {
        let mut registry = Self::default();
        for model in models {
            let name = model.name().to_string();
            if registry.models.contains_key(&name) {
                return Err(Box::new(Error::DuplicateModel { name }));
            }
            registry.models.insert(name, model);
        }
        Ok(registry)
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Interface>> {
        self.models.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Interface>> {
        self.models.values()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

/// Constructs one coremodel against a library.
pub type Provider = fn(&Library) -> Result<Arc<dyn Interface>>;

/// Named coremodel constructors, in registration order.
#[derive(Clone, Default)]
pub struct ProviderSet {
    providers: Vec<(&'static str, Provider)>,
}

impl ProviderSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn provide(mut self, name: &'static str, provider: Provider) -> Self {
        self.providers.push((name, provider));
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.providers.iter().map(|(name, _)| *name)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Run every provider, stopping at the first failure.
    pub fn build(&self, lib: &Library) -> Result<Vec<Arc<dyn Interface>>> {
        self.providers
            .iter()
            .map(|(name, provide)| {
                tracing::debug!(coremodel = *name, "providing coremodel");
                provide(lib)
            })
            .collect()
    }
}

impl fmt::Debug for ProviderSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
