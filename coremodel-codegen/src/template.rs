//! Named text templates rendered with minijinja.

use std::collections::BTreeMap;

use eyre::{Result, WrapErr, eyre};
use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;

/// A set of named templates sharing one environment.
///
/// Undefined variables are errors, so a template and the context handed to it
/// cannot silently drift apart.
pub struct Templates {
    env: Environment<'static>,
    sources: BTreeMap<String, String>,
}

impl Templates {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env.add_filter("rust_doc", rust_doc);
        env.add_filter("rust_str", rust_str);
        Self {
            env,
            sources: BTreeMap::new(),
        }
    }

    /// Register or replace a template.
    pub fn insert(&mut self, name: impl Into<String>, source: impl Into<String>) {
        self.sources.insert(name.into(), source.into());
    }

    pub fn with(mut self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.insert(name, source);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sources.contains_key(name)
    }

    pub fn render(&self, name: &str, ctx: impl Serialize) -> Result<String> {
        let source = self
            .sources
            .get(name)
            .ok_or_else(|| eyre!("no template named {name}"))?;
        self.env
            .render_str(source, ctx)
            .wrap_err_with(|| format!("failed to render template {name}"))
    }
}

impl Default for Templates {
    fn default() -> Self {
        Self::new()
    }
}

/// Turn free text into `///` doc comment lines.
fn rust_doc(value: &str) -> String {
    value
        .trim_end()
        .lines()
        .map(|line| {
            if line.trim().is_empty() {
                "///".to_string()
            } else {
                format!("/// {}", line.trim_end())
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Quote a value as a Rust string literal.
fn rust_str(value: &str) -> String {
    format!("{value:?}")
}
