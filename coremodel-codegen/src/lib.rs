//! Shared code generation utilities for the coremodel generator.
//!
//! This crate provides the language-agnostic pieces used by the
//! language-specific generators (e.g., `coremodel-codegen-rust`).
//!
//! # Module Organization
//!
//! - [`builder`] - Code generation building blocks (CodeBuilder, CodeFragment, etc.)
//! - [`language`] - Language-specific abstractions (LanguageCodegen, NamingConvention)
//! - [`Config`] / [`Layout`] - Where lineages are read from and artifacts written
//! - [`LineageSource`] - Loaded lineage plus the names generators derive from it
//! - [`Templates`] - minijinja templates shared by the Rust generators

pub mod builder;
mod config;
pub mod language;
mod layout;
mod source;
mod template;

pub use config::{CONFIG_FILE, Config, RegistryConfig, RustConfig, TypeScriptConfig};
pub use layout::{Layout, ROOT_DEPTH, resolve_root};
pub use source::{LineageSource, load_lineages};
pub use template::Templates;
