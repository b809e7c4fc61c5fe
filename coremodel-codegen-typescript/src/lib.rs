//! TypeScript declaration generator for coremodel lineages.
//!
//! For every lineage this crate writes
//! `packages/<package>/src/schema/<name>/<name>.gen.ts`: one declaration per
//! named definition of the latest schema, plus the top-level
//! `export interface Model` and its `defaultModel` constant.
//!
//! ```ignore
//! use coremodel_codegen::{Layout, LineageSource};
//! use coremodel_codegen_typescript::{Generator, LanguageCodegen};
//!
//! let generator = Generator::new(&layout);
//! let artifact = generator.preview(&source)?;
//! let written = generator.generate(&source)?;
//! ```

mod generator;
mod naming;
mod sort;

pub mod ast;
pub mod emitter;

pub use coremodel_codegen::language::{GeneratedArtifact, LanguageCodegen};
pub use generator::{Generator, MODEL_NAME};
pub use naming::TS_NAMING;
pub use sort::toposort;
