//! Rust code generation for coremodel lineages.
//!
//! - [`Generator`] - Per-lineage `coremodel_gen.rs` (types, rename, addenda)
//! - [`RegistryGenerator`] - The static registry over every lineage
//! - [`typegen`] - Serde types from OpenAPI component schemas
//! - [`rewrite`] - Lineage prefix to `Model` renaming on the syntax tree
//! - [`format`] - Import normalization

mod generator;
mod naming;
mod registry;

pub mod ast;
pub mod format;
pub mod openapi;
pub mod rewrite;
pub mod typegen;

pub use coremodel_codegen::language::{GeneratedArtifact, LanguageCodegen};
pub use format::normalize_imports;
pub use generator::Generator;
pub use naming::RUST_NAMING;
pub use registry::RegistryGenerator;
pub use rewrite::{ModelRenamer, replace_prefix};
